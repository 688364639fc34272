//! Interactive terminal quiz.
//!
//! [`QuizApp`] owns the session and turns each input line or timer tick into
//! exactly one session transition, then re-renders. The tick timer is
//! resynchronised with the session after every event.

pub mod input;
pub mod render;

use std::io::{self, Write};
use std::sync::Arc;

use rand::rngs::StdRng;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use vocabquiz_core::model::{format_elapsed, RawEntry, TopicFilter, TopicIndex};
use vocabquiz_core::session::{Phase, QuizSession, StartOutcome};
use vocabquiz_core::timer::{IntervalClock, Tick, TickTimer};
use vocabquiz_core::traits::{Celebration, Clock, NoCelebration, SilentSpeaker, Speaker};
use vocabquiz_core::QuizError;

use input::{is_yes, option_label, parse_option_label, parse_question_number, Command};

/// Whether the loop should keep going after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// The collaborators a quiz talks to besides the terminal.
pub struct Capabilities {
    pub speaker: Box<dyn Speaker>,
    pub celebration: Box<dyn Celebration>,
    pub clock: Arc<dyn Clock>,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            speaker: Box::new(SilentSpeaker),
            celebration: Box::new(NoCelebration),
            clock: Arc::new(IntervalClock::default()),
        }
    }
}

pub struct QuizApp<W: Write> {
    session: QuizSession,
    corpus: Vec<RawEntry>,
    topics: TopicIndex,
    count_text: String,
    topic: TopicFilter,
    speaker: Box<dyn Speaker>,
    celebration: Box<dyn Celebration>,
    timer: TickTimer,
    tick_tx: UnboundedSender<Tick>,
    tick_rx: UnboundedReceiver<Tick>,
    rng: StdRng,
    out: W,
    confirming_submit: bool,
}

impl<W: Write> QuizApp<W> {
    pub fn new(
        corpus: Vec<RawEntry>,
        count_text: impl Into<String>,
        topic: TopicFilter,
        capabilities: Capabilities,
        rng: StdRng,
        out: W,
    ) -> Self {
        let (tick_tx, tick_rx) = unbounded_channel();
        let topics = TopicIndex::from_corpus(&corpus);
        Self {
            session: QuizSession::new(),
            corpus,
            topics,
            count_text: count_text.into(),
            topic,
            speaker: capabilities.speaker,
            celebration: capabilities.celebration,
            timer: TickTimer::new(capabilities.clock),
            tick_tx,
            tick_rx,
            rng,
            out,
            confirming_submit: false,
        }
    }

    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    /// Drive the quiz until `quit` or the end of input.
    pub async fn run(&mut self, mut lines: UnboundedReceiver<String>) -> io::Result<()> {
        self.render_setup()?;
        self.prompt()?;

        loop {
            let flow = tokio::select! {
                line = lines.recv() => match line {
                    Some(line) => self.handle_line(&line)?,
                    None => Flow::Quit,
                },
                Some(tick) = self.tick_rx.recv() => {
                    self.handle_tick(tick);
                    Flow::Continue
                }
            };

            if flow == Flow::Quit {
                break;
            }
        }

        self.timer.stop();
        writeln!(self.out, "\nBye.")?;
        self.out.flush()
    }

    /// Count a tick if it belongs to the timer's current run.
    pub fn handle_tick(&mut self, tick: Tick) {
        if self.timer.accepts(tick) {
            self.session.tick();
        }
    }

    /// Apply one line of input, then bring the timer in line with the
    /// session.
    pub fn handle_line(&mut self, line: &str) -> io::Result<Flow> {
        let flow = if std::mem::take(&mut self.confirming_submit) {
            if is_yes(line) {
                self.submit()?;
            } else {
                writeln!(self.out, "Not submitted.")?;
            }
            Flow::Continue
        } else {
            let command = Command::parse(line);
            match self.session.phase() {
                Phase::Setup => self.handle_setup(command)?,
                Phase::Testing => self.handle_testing(command)?,
            }
        };

        self.timer.sync(self.session.timer_should_run(), &self.tick_tx);
        if flow == Flow::Continue {
            self.prompt()?;
        }
        Ok(flow)
    }

    fn handle_setup(&mut self, command: Command) -> io::Result<Flow> {
        match command {
            Command::Quit => return Ok(Flow::Quit),
            Command::Help => self.help()?,
            Command::Empty | Command::Start => self.start()?,
            Command::Count(text) if text.is_empty() => {
                writeln!(self.out, "Usage: count <number of questions>")?;
            }
            Command::Count(text) => {
                self.count_text = text;
                writeln!(self.out, "Questions: {}", self.count_text)?;
            }
            Command::Topic(text) => self.set_topic(&text)?,
            Command::Topics => self.list_topics()?,
            Command::Unknown(text) => self.unknown(&text)?,
            _ => writeln!(
                self.out,
                "Start a quiz first (press Enter); type `help` for commands."
            )?,
        }
        Ok(Flow::Continue)
    }

    fn handle_testing(&mut self, command: Command) -> io::Result<Flow> {
        match command {
            Command::Quit => return Ok(Flow::Quit),
            Command::Help => self.help()?,
            Command::Empty => {}
            Command::Answer { question, option } => self.answer(&question, &option)?,
            Command::Show => self.render_quiz()?,
            Command::Submit => {
                let unanswered = self.session.unanswered_count();
                if unanswered > 0 && !self.session.is_submitted() {
                    write!(
                        self.out,
                        "{unanswered} question(s) unanswered. Submit anyway? [y/N] "
                    )?;
                    self.confirming_submit = true;
                } else {
                    self.submit()?;
                }
            }
            Command::Retry => match self.session.retry_wrong(&mut self.rng) {
                Ok(n) => {
                    writeln!(self.out, "Retrying {n} question(s).")?;
                    self.render_quiz()?;
                }
                Err(QuizError::NothingToRetry) => {
                    writeln!(self.out, "Nothing to retry: every answer was correct.")?;
                }
                Err(e) => self.rejected(&e)?,
            },
            Command::New | Command::Setup => {
                self.session.back_to_setup();
                self.render_setup()?;
            }
            Command::Time => writeln!(
                self.out,
                "⏱ {}",
                format_elapsed(self.session.elapsed_seconds())
            )?,
            Command::Say(text) => self.say(&text)?,
            Command::Topics => self.list_topics()?,
            // Only legal from setup; the session reports the rejection.
            Command::Start => self.start()?,
            Command::Count(_) | Command::Topic(_) => writeln!(
                self.out,
                "Go back to setup (`setup`) to change the quiz settings."
            )?,
            Command::Unknown(text) => self.unknown(&text)?,
        }
        Ok(Flow::Continue)
    }

    fn start(&mut self) -> io::Result<()> {
        let outcome = self.session.start(
            &self.corpus,
            &self.count_text,
            self.topic.clone(),
            &mut self.rng,
        );
        match outcome {
            Ok(StartOutcome::Ready(n)) => {
                self.timer.start(self.tick_tx.clone());
                writeln!(self.out, "Starting a quiz of {n} question(s) ({}).", self.topic)?;
                self.render_quiz()
            }
            Ok(StartOutcome::EmptySelection) => {
                writeln!(
                    self.out,
                    "No words available for topic \"{}\". Pick another topic.",
                    self.topic
                )?;
                self.session.back_to_setup();
                self.render_setup()
            }
            Err(e) => self.rejected(&e),
        }
    }

    fn set_topic(&mut self, text: &str) -> io::Result<()> {
        match text.parse::<TopicFilter>() {
            Ok(topic) => {
                if let TopicFilter::Topic(name) = &topic {
                    if !self.topics.contains(name) {
                        tracing::warn!(topic = %name, "selected topic has no words");
                        writeln!(self.out, "No words are tagged \"{name}\" yet.")?;
                    }
                }
                self.topic = topic;
                writeln!(self.out, "Topic: {}", self.topic)
            }
            Err(_) => writeln!(self.out, "Usage: topic <name|all>"),
        }
    }

    fn answer(&mut self, question: &str, option: &str) -> io::Result<()> {
        let Some(index) = parse_question_number(question) else {
            return writeln!(self.out, "Questions are numbered from 1.");
        };
        let Some(q) = self.session.questions().get(index) else {
            return writeln!(self.out, "There is no question {question}.");
        };
        let Some(value) = parse_option_label(option).and_then(|i| q.options.get(i)) else {
            return writeln!(
                self.out,
                "Question {question} has options a to {}.",
                option_label(q.options.len().saturating_sub(1))
            );
        };
        let value = value.clone();

        match self.session.select_option(index, value.clone()) {
            Ok(()) => {
                writeln!(self.out, "{question} → {value}")?;
                render::status(
                    &mut self.out,
                    self.session.answers().len(),
                    self.session.questions().len(),
                    self.session.elapsed_seconds(),
                )
            }
            Err(e) => self.rejected(&e),
        }
    }

    fn submit(&mut self) -> io::Result<()> {
        match self.session.submit() {
            Ok(report) => {
                self.render_quiz()?;
                render::score(&mut self.out, &report, self.session.elapsed_seconds())?;
                self.out.flush()?;
                self.celebration.celebrate(report.percent);
                Ok(())
            }
            Err(e) => self.rejected(&e),
        }
    }

    fn say(&mut self, text: &str) -> io::Result<()> {
        if !self.session.is_submitted() {
            return writeln!(self.out, "Pronunciation is available after submitting.");
        }
        match parse_question_number(text).and_then(|i| self.session.questions().get(i)) {
            Some(q) => {
                self.speaker.say(&q.word);
                writeln!(self.out, "🔊 {}", q.word)
            }
            None => writeln!(self.out, "Usage: say <question number>"),
        }
    }

    fn list_topics(&mut self) -> io::Result<()> {
        writeln!(
            self.out,
            "{}",
            render::topic_table(&self.topics, self.corpus.len())
        )
    }

    fn help(&mut self) -> io::Result<()> {
        let text = match self.session.phase() {
            Phase::Setup => SETUP_HELP,
            Phase::Testing => TESTING_HELP,
        };
        writeln!(self.out, "{text}")
    }

    fn unknown(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "Unknown command `{text}`; type `help`.")
    }

    fn rejected(&mut self, err: &QuizError) -> io::Result<()> {
        if err.needs_user_action() {
            writeln!(self.out, "{err}. Fix it with `count <n>`.")
        } else {
            writeln!(self.out, "{err}.")
        }
    }

    fn render_setup(&mut self) -> io::Result<()> {
        render::setup_screen(
            &mut self.out,
            &self.count_text,
            &self.topic.to_string(),
            &self.topics,
            self.corpus.len(),
        )
    }

    fn render_quiz(&mut self) -> io::Result<()> {
        render::quiz_screen(
            &mut self.out,
            self.session.questions(),
            self.session.answers(),
            self.session.is_submitted(),
            self.session.elapsed_seconds(),
        )
    }

    fn prompt(&mut self) -> io::Result<()> {
        if !self.confirming_submit {
            write!(self.out, "> ")?;
        }
        self.out.flush()
    }
}

const SETUP_HELP: &str = "\
  count <n>          number of questions (default 10)
  topic <name|all>   draw words from one topic, or from all of them
  topics             list topics and word counts
  start, Enter       begin the quiz
  quit               leave";

const TESTING_HELP: &str = "\
  <q> <option>       answer question q, e.g. `3 b` or `3 2`
  show               show all questions again
  submit             finish and score the quiz
  time               elapsed answering time
  say <q>            pronounce the word of question q (after submitting)
  retry              retry the questions you got wrong
  new, setup         back to setup
  quit               leave";
