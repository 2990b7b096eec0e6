use crate::decoder::{CodeFormat, DecodedCode};
use std::str::FromStr;

pub const HELP_TEXT: &str = "\
signup <email> <password>   create an account and sign in
signin <email> <password>   sign in
signout                     sign out and clear the history
scan                        open the camera
decode [format] <payload>   feed a decoded code (\\n in the payload is a line break)
another                     scan another code
open [id]                   run the action for the pending scan or a history entry
copy [id]                   copy the pending scan or a history entry
close                       close the camera
history                     list recent scans
clear                       clear the history
status                      show the current state
help                        show this help
quit                        exit";

/// One line of terminal input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SignUp { email: String, password: String },
    SignIn { email: String, password: String },
    SignOut,
    Scan,
    Decode(DecodedCode),
    Another,
    Open(Option<u64>),
    Copy(Option<u64>),
    Close,
    History,
    Clear,
    Status,
    Help,
    Quit,
}

fn split_word(input: &str) -> (&str, &str) {
    let input = input.trim_start();
    match input.find(char::is_whitespace) {
        Some(index) => (&input[..index], input[index..].trim_start()),
        None => (input, ""),
    }
}

fn credentials(args: &str) -> (String, String) {
    let (email, rest) = split_word(args);
    let (password, _) = split_word(rest);
    (email.to_string(), password.to_string())
}

fn record_id(args: &str) -> Result<Option<u64>, String> {
    let args = args.trim();
    if args.is_empty() {
        return Ok(None);
    }
    args.parse()
        .map(Some)
        .map_err(|_| format!("Invalid record id: {}", args))
}

fn decoded_code(args: &str) -> Result<DecodedCode, String> {
    let (first, rest) = split_word(args);
    let (format, payload) = match first.parse::<CodeFormat>() {
        Ok(format) if !rest.is_empty() => (format, rest),
        _ => (CodeFormat::Qr, args.trim_start()),
    };

    if payload.is_empty() {
        return Err("Usage: decode [format] <payload>".to_string());
    }

    Ok(DecodedCode::new(format, payload.replace("\\n", "\n")))
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let (name, args) = split_word(line.trim_end_matches(['\r', '\n']));

        let command = match name.to_lowercase().as_str() {
            "signup" | "register" => {
                let (email, password) = credentials(args);
                Command::SignUp { email, password }
            }
            "signin" | "login" => {
                let (email, password) = credentials(args);
                Command::SignIn { email, password }
            }
            "signout" | "logout" => Command::SignOut,
            "scan" => Command::Scan,
            "decode" => Command::Decode(decoded_code(args)?),
            "another" => Command::Another,
            "open" => Command::Open(record_id(args)?),
            "copy" => Command::Copy(record_id(args)?),
            "close" => Command::Close,
            "history" => Command::History,
            "clear" => Command::Clear,
            "status" => Command::Status,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            "" => return Err("Empty command".to_string()),
            other => return Err(format!("Unknown command: {} (try 'help')", other)),
        };

        Ok(command)
    }
}
