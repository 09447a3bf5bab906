// Colored terminal rendering of the analysis envelope.
//
// This module handles all terminal-specific formatting; main.rs
// display logic delegates here. JSON output bypasses this entirely.

use colored::Colorize;

use crate::analysis::AnalysisResult;
use crate::corpus::Paper;

/// Render the full envelope section by section. Only requested
/// sub-results are present, so absent sections are simply skipped.
pub fn display_result(result: &AnalysisResult, papers: &[Paper]) {
    println!(
        "\n{}",
        format!("=== Analysis Report ({} papers) ===", result.paper_count).bold()
    );

    if result.degraded {
        println!("\n  {} degraded result:", "!".yellow().bold());
        for note in &result.notes {
            println!("    - {note}");
        }
    } else {
        for note in &result.notes {
            println!("  {}", note.dimmed());
        }
    }

    if let Some(clustering) = &result.clustering {
        println!("\n{}", "Content clusters".bold());
        println!("  {}", clustering.summary.dimmed());
        for cluster in &clustering.clusters {
            println!(
                "  [{}] {} ({} papers)",
                cluster.id,
                cluster.keywords.join(", ").cyan(),
                cluster.members.len()
            );
            for &index in &cluster.members {
                println!("      - {}", title_of(papers, index));
            }
        }
    }

    if let Some(topics) = &result.topics {
        println!("\n{}", "Topics".bold());
        println!("  {}", topics.summary.dimmed());
        for topic in &topics.topics {
            let bar_len = (topic.weight * 30.0).round() as usize;
            println!(
                "  [{}] {:>5.1}% {} {}",
                topic.id,
                topic.weight * 100.0,
                "#".repeat(bar_len).green(),
                topic.keywords.join(", ").cyan()
            );
        }
        if topics.fallback {
            println!("  {}", "(low-confidence placeholder topic)".yellow());
        }
    }

    if let Some(similarity) = &result.similarity {
        println!("\n{}", "Similar paper pairs".bold());
        println!("  {}", similarity.summary.dimmed());
        for pair in &similarity.pairs {
            println!(
                "  {:.3}  {}  <->  {}",
                pair.score,
                title_of(papers, pair.a),
                title_of(papers, pair.b)
            );
        }
    }

    if let Some(trends) = &result.trends {
        println!("\n{}", "Publication trends".bold());
        println!("  {}", trends.summary.dimmed());
        for point in &trends.points {
            println!("  {}  {}", point.year, "#".repeat(point.count).green());
        }
        for growth in &trends.growth {
            if growth.defined {
                println!("  {}  {:+.1}% growth", growth.year, growth.rate * 100.0);
            } else {
                println!("  {}  growth undefined (prior year empty)", growth.year);
            }
        }
        if let Some(pseudo) = &trends.pseudo_trend {
            println!("  {}", "Keyword estimate (not measured data):".yellow());
            for entry in pseudo {
                println!("    {}  {:.3}", entry.keyword.cyan(), entry.score);
            }
        }
    }

    if let Some(gaps) = &result.gaps {
        println!("\n{}", "Literature gaps".bold());
        println!("  {}", gaps.summary.dimmed());
        for gap in &gaps.gaps {
            println!(
                "  {:.2}  {} x {}",
                gap.confidence,
                gap.term_a.cyan(),
                gap.term_b.cyan()
            );
            println!("        {}", gap.description.dimmed());
        }
    }

    if let Some(impact) = &result.impact {
        println!("\n{}", "Impact ranking".bold());
        println!("  {}", impact.summary.dimmed());
        if impact.demonstrative {
            println!(
                "  {}",
                "Demonstrative ranking from synthetic targets — not a verified prediction."
                    .yellow()
            );
        }
        println!(
            "  {:>4}  {:<50} {:>8}",
            "Rank".dimmed(),
            "Title".dimmed(),
            "Score".dimmed()
        );
        for (i, estimate) in impact.ranking.iter().enumerate() {
            println!(
                "  {:>4}. {:<50} {:>8.3}",
                i + 1,
                truncate(&title_of(papers, estimate.paper_index), 50),
                estimate.predicted_score
            );
        }
    }

    println!();
}

fn title_of(papers: &[Paper], index: usize) -> String {
    papers
        .get(index)
        .map(|p| p.title.clone())
        .unwrap_or_else(|| format!("Paper {index}"))
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{cut}...")
    }
}
