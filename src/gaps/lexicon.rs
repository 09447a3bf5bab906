// Fixed term lexicons for gap detection.
//
// Three vocabularies: research topics, methods, and benchmark
// datasets. Matching is case-insensitive substring over normalized
// paper text, so every term is stored lowercase.

pub const TOPIC_TERMS: &[&str] = &[
    "machine learning",
    "deep learning",
    "reinforcement learning",
    "computer vision",
    "natural language processing",
    "speech recognition",
    "graph neural network",
    "recommendation",
    "time series",
    "robotics",
    "drug discovery",
    "medical imaging",
];

pub const METHOD_TERMS: &[&str] = &[
    "transformer",
    "convolutional",
    "recurrent",
    "attention",
    "self-supervised",
    "contrastive",
    "fine-tuning",
    "bayesian",
    "ensemble",
    "distillation",
    "federated",
    "diffusion",
];

pub const DATASET_TERMS: &[&str] = &[
    "imagenet",
    "coco",
    "cifar",
    "mnist",
    "squad",
    "glue",
    "wikitext",
    "librispeech",
    "kitti",
    "pubmed",
];
