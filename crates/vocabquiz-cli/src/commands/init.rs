//! The `vocabquiz init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    let path = Path::new("vocabquiz.toml");
    if path.exists() {
        println!("vocabquiz.toml already exists, skipping.");
    } else {
        std::fs::write(path, SAMPLE_CONFIG)?;
        println!("Created vocabquiz.toml");
    }

    println!("\nNext steps:");
    println!("  1. Point sheet_url at your published sheet (or keep the default)");
    println!("  2. Run: vocabquiz validate");
    println!("  3. Run: vocabquiz play");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# vocabquiz configuration

# gviz JSON endpoint of a published Google Sheet. Columns: word, -, type,
# meaning, example, three wrong meanings, topic.
sheet_url = "https://docs.google.com/spreadsheets/d/1NdwXWfig1nRRvAcrt6IHwYrjMuLvAcxRIPzeLMxOn9Q/gviz/tq?tqx=out:json"

default_count = "10"
default_topic = "all"
request_timeout_secs = 30

# Scores at or above this percentage get a celebration.
celebrate_threshold = 80

[speech]
enabled = true
command = "espeak"
args = ["-v", "en-us"]
"#;
