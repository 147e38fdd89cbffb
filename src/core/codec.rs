//! Line format of the backing store:
//! `<surname> <givenName> <phone1> [<phone2> ...]`, one subscriber per line.

use crate::config::EmptySubscriberPolicy;
use crate::domain::model::Subscriber;
use crate::utils::error::{DirectoryError, Result};
use std::borrow::Cow;

/// Parses one line. Blank lines yield `Ok(None)`.
///
/// A line holding only a surname and a name decodes to a subscriber without
/// numbers, which is what `EmptySubscriberPolicy::NameOnly` writes.
pub fn decode_line(line_no: usize, line: &str) -> Result<Option<Subscriber>> {
    let mut tokens = line.split_whitespace();

    let Some(surname) = tokens.next() else {
        return Ok(None);
    };

    let Some(given_name) = tokens.next() else {
        return Err(DirectoryError::ParseError {
            line: line_no,
            reason: format!("expected a surname and a name, found only '{}'", surname),
        });
    };

    let mut subscriber = Subscriber::new(surname, given_name);
    for phone_number in tokens {
        subscriber.add_phone_number(phone_number);
    }

    Ok(Some(subscriber))
}

/// Decodes every line, splitting good records from per-line failures so the
/// caller can decide what to report.
///
/// Lines are decoded one at a time. A line that is not valid UTF-8 (say a
/// Latin-1 surname) is decoded lossily with a warning instead of failing the
/// whole file.
pub fn decode(contents: &[u8]) -> (Vec<Subscriber>, Vec<DirectoryError>) {
    let mut records = Vec::new();
    let mut failures = Vec::new();

    for (index, raw) in contents.split(|byte| *byte == b'\n').enumerate() {
        let line = String::from_utf8_lossy(raw);
        if let Cow::Owned(_) = line {
            tracing::warn!(
                "Line {} is not valid UTF-8; invalid bytes replaced",
                index + 1
            );
        }

        match decode_line(index + 1, &line) {
            Ok(Some(subscriber)) => records.push(subscriber),
            Ok(None) => {}
            Err(e) => failures.push(e),
        }
    }

    (records, failures)
}

/// A field survives the format only as one non-empty whitespace-free token.
fn is_token(value: &str) -> bool {
    !value.is_empty() && !value.chars().any(char::is_whitespace)
}

/// Whether `encode_line` would parse back to the same record.
pub fn is_encodable(subscriber: &Subscriber) -> bool {
    is_token(subscriber.surname())
        && is_token(subscriber.given_name())
        && subscriber.phone_numbers().iter().all(|p| is_token(p))
}

pub fn encode_line(subscriber: &Subscriber) -> String {
    let mut line = subscriber.full_name();
    for phone_number in subscriber.phone_numbers() {
        line.push(' ');
        line.push_str(phone_number);
    }
    line
}

/// Serializes in iteration order. Returns the text and the number of records
/// left out, either because of `policy` or because a field is not a single
/// token and would read back as a different record.
pub fn encode<'a>(
    subscribers: impl IntoIterator<Item = &'a Subscriber>,
    policy: EmptySubscriberPolicy,
) -> (String, usize) {
    let mut output = String::new();
    let mut skipped = 0;

    for subscriber in subscribers {
        if !is_encodable(subscriber) {
            tracing::warn!(
                "Not saving '{}' '{}': names and phone numbers must be single words",
                subscriber.surname(),
                subscriber.given_name()
            );
            skipped += 1;
            continue;
        }

        if subscriber.is_empty() && policy == EmptySubscriberPolicy::Skip {
            tracing::warn!(
                "Not saving {} {}: no phone numbers left",
                subscriber.surname(),
                subscriber.given_name()
            );
            skipped += 1;
            continue;
        }

        output.push_str(&encode_line(subscriber));
        output.push('\n');
    }

    (output, skipped)
}
