//! Terminal implementations of the speech and celebration capabilities.

use std::io::Write;
use std::process::Stdio;

use vocabquiz_core::traits::{Celebration, SilentSpeaker, Speaker};
use vocabquiz_feed::SpeechConfig;

/// Speaks words by spawning a text-to-speech program such as `espeak`.
pub struct CommandSpeaker {
    command: String,
    args: Vec<String>,
}

impl CommandSpeaker {
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
        }
    }
}

impl Speaker for CommandSpeaker {
    fn say(&self, word: &str) {
        let spawned = tokio::process::Command::new(&self.command)
            .args(&self.args)
            .arg(word)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();
        match spawned {
            // The child is reaped by the runtime once it exits.
            Ok(_child) => tracing::debug!(command = %self.command, word, "speaking"),
            Err(e) => tracing::warn!(command = %self.command, "could not start speech: {e}"),
        }
    }
}

/// Pick a speaker from config and the `--no-speech` flag.
pub fn speaker_for(config: &SpeechConfig, no_speech: bool) -> Box<dyn Speaker> {
    if no_speech || !config.enabled || config.command.is_empty() {
        Box::new(SilentSpeaker)
    } else {
        Box::new(CommandSpeaker::new(&config.command, config.args.clone()))
    }
}

/// Prints a banner for scores at or above the threshold.
pub struct TerminalCelebration {
    threshold: u8,
}

impl TerminalCelebration {
    pub fn new(threshold: u8) -> Self {
        Self { threshold }
    }

    fn banner(&self, percent: u8) -> Option<String> {
        (percent >= self.threshold).then(|| {
            if percent == 100 {
                "🎉 Perfect score! 🎉".to_string()
            } else {
                format!("🎉 Well done, {percent}%! 🎉")
            }
        })
    }
}

impl Celebration for TerminalCelebration {
    fn celebrate(&self, percent: u8) {
        if let Some(banner) = self.banner(percent) {
            let mut stdout = std::io::stdout().lock();
            let _ = writeln!(stdout, "\n{banner}");
        }
    }
}
