// Publication-year trend analysis.
//
// Counts papers per derivable publication year and computes the
// year-over-year growth rate between adjacent populated years. Years
// with no papers are skipped, not zero-filled (so growth is measured
// between the populated years on either side of a gap). Papers with no
// derivable year are ignored rather than failing the run.
//
// With fewer than two distinct years there is no trend to measure; the
// analyzer then reports insufficient temporal data and substitutes a
// keyword-frequency pseudo-trend, explicitly flagged as an estimate.

use std::collections::BTreeMap;

use chrono::Datelike;
use keyword_extraction::tf_idf::{TfIdf, TfIdfParams};
use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use stop_words::{get, LANGUAGE};
use tracing::debug;

use crate::corpus::{self, Paper};

/// Metadata keys checked for a year-like value when `published_date`
/// is absent.
const YEAR_METADATA_KEYS: [&str; 3] = ["year", "published", "date"];

/// How many keywords the pseudo-trend fallback reports.
const PSEUDO_TREND_KEYWORDS: usize = 5;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendPoint {
    pub year: i32,
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrowthPoint {
    pub year: i32,
    /// `(count_n - count_prev) / count_prev` between adjacent
    /// populated years; 0.0 with `defined = false` when the prior
    /// count is zero.
    pub rate: f64,
    pub defined: bool,
}

/// One entry of the keyword-frequency pseudo-trend. An estimate, never
/// measured temporal data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordTrend {
    pub keyword: String,
    pub score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendResult {
    /// One point per distinct populated year, ascending.
    pub points: Vec<TrendPoint>,
    pub growth: Vec<GrowthPoint>,
    /// Fewer than two distinct years were derivable.
    pub insufficient_temporal_data: bool,
    /// Keyword-frequency substitute, present only when temporal data
    /// is insufficient. Always an estimate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pseudo_trend: Option<Vec<KeywordTrend>>,
    pub summary: String,
}

/// Analyze publication trends across the corpus. Never fails: papers
/// without a derivable year degrade to exclusion, and a corpus without
/// enough temporal spread degrades to the pseudo-trend estimate.
pub fn analyze_trends(papers: &[Paper]) -> TrendResult {
    let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
    for paper in papers {
        if let Some(year) = derive_year(paper) {
            *counts.entry(year).or_insert(0) += 1;
        }
    }

    let points: Vec<TrendPoint> = counts
        .iter()
        .map(|(&year, &count)| TrendPoint { year, count })
        .collect();

    debug!(
        papers = papers.len(),
        dated = points.iter().map(|p| p.count).sum::<usize>(),
        years = points.len(),
        "trend extraction complete"
    );

    if points.len() < 2 {
        return TrendResult {
            points,
            growth: vec![],
            insufficient_temporal_data: true,
            pseudo_trend: pseudo_trend(papers),
            summary: "Fewer than two publication years derivable; substituting a keyword-frequency estimate.".to_string(),
        };
    }

    let growth = points
        .windows(2)
        .map(|pair| {
            let (prev, curr) = (&pair[0], &pair[1]);
            if prev.count == 0 {
                GrowthPoint {
                    year: curr.year,
                    rate: 0.0,
                    defined: false,
                }
            } else {
                GrowthPoint {
                    year: curr.year,
                    rate: (curr.count as f64 - prev.count as f64) / prev.count as f64,
                    defined: true,
                }
            }
        })
        .collect();

    TrendResult {
        summary: format!(
            "Analyzed publication trends across {} years.",
            points.len()
        ),
        points,
        growth,
        insufficient_temporal_data: false,
        pseudo_trend: None,
    }
}

/// Publication year from the date field, else the first year-like
/// value in the known metadata keys.
fn derive_year(paper: &Paper) -> Option<i32> {
    if let Some(date) = paper.published_date {
        return Some(date.year());
    }
    // A 4-digit 19xx/20xx run is treated as a year.
    let year_re = Regex::new(r"(19|20)\d{2}").expect("static regex");
    for key in YEAR_METADATA_KEYS {
        if let Some(value) = paper.metadata.get(key) {
            if let Some(m) = year_re.find(value) {
                if let Ok(year) = m.as_str().parse::<i32>() {
                    return Some(year);
                }
            }
        }
    }
    None
}

/// Rank the corpus's most distinctive keywords as a stand-in trend
/// when temporal data is missing. Returns None only for a corpus that
/// produced no keywords at all.
fn pseudo_trend(papers: &[Paper]) -> Option<Vec<KeywordTrend>> {
    if papers.is_empty() {
        return None;
    }
    let docs = corpus::normalize(papers);
    let stopwords: Vec<String> = get(LANGUAGE::English);

    let params = TfIdfParams::UnprocessedDocuments(&docs, &stopwords, None);
    let ranked = TfIdf::new(params).get_ranked_word_scores(PSEUDO_TREND_KEYWORDS);
    if ranked.is_empty() {
        return None;
    }

    Some(
        ranked
            .into_iter()
            .map(|(keyword, score)| KeywordTrend {
                keyword,
                score: score as f64,
            })
            .collect(),
    )
}
