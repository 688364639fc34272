//! Text rendering of the setup and quiz screens.

use std::io::{self, Write};

use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, Table};

use vocabquiz_core::model::{format_elapsed, AnswerMap, Question, TopicIndex};
use vocabquiz_core::scoring::ScoreReport;

use super::input::option_label;

/// Table of topics and how many words each has.
pub fn topic_table(topics: &TopicIndex, corpus_size: usize) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Topic", "Words"]);
    table.add_row(vec![Cell::new("all"), Cell::new(corpus_size)]);
    for (topic, count) in topics.iter() {
        table.add_row(vec![Cell::new(topic), Cell::new(count)]);
    }
    table
}

pub fn setup_screen(
    out: &mut impl Write,
    count_text: &str,
    topic: &str,
    topics: &TopicIndex,
    corpus_size: usize,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "=== Vocabs Quiz ===")?;
    if corpus_size == 0 {
        writeln!(out, "No vocabulary loaded; every quiz will be empty.")?;
    } else {
        writeln!(out, "{corpus_size} words in {} topics.", topics.len())?;
    }
    writeln!(out, "Questions: {count_text}")?;
    match topic {
        "all" => writeln!(out, "Topic: all")?,
        name => writeln!(out, "Topic: {name} ({})", topics.count(name))?,
    }
    writeln!(
        out,
        "Commands: count <n>, topic <name|all>, topics, start (or Enter), quit"
    )
}

pub fn question(
    out: &mut impl Write,
    index: usize,
    total: usize,
    q: &Question,
    answers: &AnswerMap,
    submitted: bool,
) -> io::Result<()> {
    let chosen = answers.get(&index);
    writeln!(out)?;
    writeln!(out, "{}/{total}. What does \"{}\" mean?", index + 1, q.word)?;
    for (i, option) in q.options.iter().enumerate() {
        let selected = chosen == Some(option);
        let marker = match (submitted, selected, q.is_correct(option)) {
            (false, true, _) => ">",
            (false, false, _) => " ",
            (true, _, true) => "✓",
            (true, true, false) => "✗",
            (true, false, false) => " ",
        };
        writeln!(out, "  {marker} {}) {option}", option_label(i))?;
    }
    if submitted {
        if chosen.is_none() {
            writeln!(out, "    (not answered)")?;
        }
        writeln!(out, "    {} ({})", q.word, q.word_type)?;
        if !q.example.is_empty() {
            writeln!(out, "    \"{}\"", q.example)?;
        }
    }
    Ok(())
}

pub fn quiz_screen(
    out: &mut impl Write,
    questions: &[Question],
    answers: &AnswerMap,
    submitted: bool,
    elapsed: u64,
) -> io::Result<()> {
    for (i, q) in questions.iter().enumerate() {
        question(out, i, questions.len(), q, answers, submitted)?;
    }
    writeln!(out)?;
    status(out, answers.len(), questions.len(), elapsed)?;
    if submitted {
        writeln!(out, "Commands: say <n>, retry, new, setup, show, quit")
    } else {
        writeln!(
            out,
            "Answer with <question> <option> (e.g. 1 b). Commands: submit, show, time, setup, quit"
        )
    }
}

pub fn status(out: &mut impl Write, answered: usize, total: usize, elapsed: u64) -> io::Result<()> {
    writeln!(out, "Answered {answered}/{total}  ⏱ {}", format_elapsed(elapsed))
}

pub fn score(out: &mut impl Write, report: &ScoreReport, elapsed: u64) -> io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "Score: {}/{} ({}%)  ⏱ {}",
        report.correct_count,
        report.total,
        report.percent,
        format_elapsed(elapsed)
    )?;
    if report.wrong_count() > 0 {
        writeln!(
            out,
            "{} wrong; type `retry` to practise them again.",
            report.wrong_count()
        )?;
    }
    Ok(())
}
