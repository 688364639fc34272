//! Parsing of typed quiz commands.

/// One line of user input, interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Blank line; starts the quiz from setup.
    Empty,
    Help,
    Quit,
    /// `count <text>`: the raw text is validated when the round starts.
    Count(String),
    /// `topic <name|all>`
    Topic(String),
    /// `topics`
    Topics,
    Start,
    /// `<question> <option>`, both still unparsed.
    Answer { question: String, option: String },
    Show,
    Submit,
    Retry,
    /// Start-new: abandon this round and go back to setup.
    New,
    /// Return to setup.
    Setup,
    Time,
    /// `say <question>`
    Say(String),
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Command::Empty;
        }

        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };

        match head.to_lowercase().as_str() {
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            "count" => Command::Count(rest.to_string()),
            "topic" => Command::Topic(rest.to_string()),
            "topics" => Command::Topics,
            "start" => Command::Start,
            "show" => Command::Show,
            "submit" => Command::Submit,
            "retry" => Command::Retry,
            "new" => Command::New,
            "setup" => Command::Setup,
            "time" => Command::Time,
            "say" => Command::Say(rest.to_string()),
            _ if head.chars().all(|c| c.is_ascii_digit()) && !rest.is_empty() => Command::Answer {
                question: head.to_string(),
                option: rest.to_string(),
            },
            _ => Command::Unknown(line.to_string()),
        }
    }
}

/// Parse a 1-based question number into a 0-based index.
pub fn parse_question_number(text: &str) -> Option<usize> {
    text.trim().parse::<usize>().ok()?.checked_sub(1)
}

/// Parse an option label, either a letter (`a`, `B`) or a 1-based number, into a
/// 0-based index.
pub fn parse_option_label(text: &str) -> Option<usize> {
    let text = text.trim();
    let mut chars = text.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if c.is_ascii_alphabetic() {
            return Some((c.to_ascii_lowercase() as u8 - b'a') as usize);
        }
    }
    text.parse::<usize>().ok()?.checked_sub(1)
}

/// Letter shown next to option `index`.
pub fn option_label(index: usize) -> char {
    (b'a' + (index % 26) as u8) as char
}

/// Whether a confirmation answer means yes.
pub fn is_yes(line: &str) -> bool {
    matches!(line.trim().to_lowercase().as_str(), "y" | "yes")
}
