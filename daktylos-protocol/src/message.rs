//! Message parsing and encoding
//!
//! Field separator is `,`. Values are plain decimal ASCII; the float
//! syntax is whatever `f32::from_str` accepts.

use core::fmt::Write;
use core::str::FromStr;

use heapless::String;

use crate::line::MAX_LINE_LEN;

/// Highest valid publish channel id
pub const MAX_CHANNEL: u8 = 10;

/// Maximum length of a unit tag, in bytes
pub const UNIT_LEN: usize = 12;

/// Errors that can occur while parsing a message line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MessageError {
    /// Line was empty after trimming
    Empty,
    /// Fewer fields than the message type requires
    MissingField,
    /// A numeric field failed to parse
    InvalidNumber,
    /// Channel id outside [1, MAX_CHANNEL]
    ChannelOutOfRange,
    /// Hour/minute/second outside wall-clock range
    TimeOutOfRange,
    /// Line exceeded the buffer or was not valid UTF-8
    MalformedLine,
}

/// A published channel value
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelMessage {
    pub channel: u8,
    pub value: f32,
    pub unit: String<UNIT_LEN>,
}

impl ChannelMessage {
    /// Build a message, truncating an overlong unit tag at a
    /// character boundary
    pub fn new(channel: u8, value: f32, unit: &str) -> Self {
        let mut tag = String::new();
        for c in unit.chars() {
            if tag.push(c).is_err() {
                break;
            }
        }
        Self {
            channel,
            value,
            unit: tag,
        }
    }

    /// Encode as one protocol line, without the trailing newline
    pub fn encode(&self) -> String<MAX_LINE_LEN> {
        let mut line = String::new();
        // MAX_LINE_LEN always fits channel + f32 + UNIT_LEN
        let _ = write!(line, "{},{},{}", self.channel, self.value, self.unit);
        line
    }
}

/// A wall-clock sync from the bridge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeSync {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl TimeSync {
    /// Encode as one protocol line, without the trailing newline
    pub fn encode(&self) -> String<MAX_LINE_LEN> {
        let mut line = String::new();
        let _ = write!(line, "T,{},{},{}", self.hour, self.minute, self.second);
        line
    }
}

/// Any message the bridge can send
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Message {
    Channel(ChannelMessage),
    Time(TimeSync),
}

impl Message {
    /// Parse one line, excluding the newline
    pub fn parse(line: &str) -> Result<Self, MessageError> {
        let line = line.trim();
        if line.is_empty() {
            return Err(MessageError::Empty);
        }
        let mut fields = line.split(',');
        let first = fields.next().ok_or(MessageError::MissingField)?;

        if first == "T" {
            let hour = parse_field::<u8>(fields.next())?;
            let minute = parse_field::<u8>(fields.next())?;
            let second = parse_field::<u8>(fields.next())?;
            if hour >= 24 || minute >= 60 || second >= 60 {
                return Err(MessageError::TimeOutOfRange);
            }
            return Ok(Message::Time(TimeSync {
                hour,
                minute,
                second,
            }));
        }

        let channel: u8 = first
            .trim()
            .parse()
            .map_err(|_| MessageError::InvalidNumber)?;
        if channel == 0 || channel > MAX_CHANNEL {
            return Err(MessageError::ChannelOutOfRange);
        }
        let value = parse_field::<f32>(fields.next())?;
        let unit = fields.next().ok_or(MessageError::MissingField)?.trim();
        if unit.is_empty() {
            return Err(MessageError::MissingField);
        }
        Ok(Message::Channel(ChannelMessage::new(channel, value, unit)))
    }
}

fn parse_field<T: FromStr>(field: Option<&str>) -> Result<T, MessageError> {
    field
        .ok_or(MessageError::MissingField)?
        .trim()
        .parse()
        .map_err(|_| MessageError::InvalidNumber)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_channel_message() {
        let msg = Message::parse("2,23.5,°C").unwrap();
        match msg {
            Message::Channel(ch) => {
                assert_eq!(ch.channel, 2);
                assert_eq!(ch.value, 23.5);
                assert_eq!(ch.unit.as_str(), "°C");
            }
            other => panic!("expected channel message, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_time_sync() {
        let msg = Message::parse("T,13,45,07").unwrap();
        assert_eq!(
            msg,
            Message::Time(TimeSync {
                hour: 13,
                minute: 45,
                second: 7
            })
        );
    }

    #[test]
    fn test_parse_tolerates_spaces_and_cr() {
        let msg = Message::parse(" 3, -1.25, timer \r").unwrap();
        match msg {
            Message::Channel(ch) => {
                assert_eq!(ch.channel, 3);
                assert_eq!(ch.value, -1.25);
                assert_eq!(ch.unit.as_str(), "timer");
            }
            other => panic!("expected channel message, got {:?}", other),
        }
    }

    #[test]
    fn test_channel_zero_and_overrange_rejected() {
        assert_eq!(
            Message::parse("0,1.0,x"),
            Err(MessageError::ChannelOutOfRange)
        );
        assert_eq!(
            Message::parse("11,1.0,x"),
            Err(MessageError::ChannelOutOfRange)
        );
    }

    #[test]
    fn test_missing_and_invalid_fields() {
        assert_eq!(Message::parse(""), Err(MessageError::Empty));
        assert_eq!(Message::parse("2,3.0"), Err(MessageError::MissingField));
        assert_eq!(Message::parse("2,abc,x"), Err(MessageError::InvalidNumber));
        assert_eq!(Message::parse("x,1.0,y"), Err(MessageError::InvalidNumber));
    }

    #[test]
    fn test_time_out_of_range() {
        assert_eq!(Message::parse("T,24,0,0"), Err(MessageError::TimeOutOfRange));
        assert_eq!(Message::parse("T,12,60,0"), Err(MessageError::TimeOutOfRange));
    }

    #[test]
    fn test_encode_parse_round_trip() {
        let original = ChannelMessage::new(7, 1013.25, "hPa");
        let line = original.encode();
        let parsed = Message::parse(&line).unwrap();
        assert_eq!(parsed, Message::Channel(original));

        let sync = TimeSync {
            hour: 23,
            minute: 59,
            second: 59,
        };
        assert_eq!(Message::parse(&sync.encode()).unwrap(), Message::Time(sync));
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_parse_never_panics(line in "\\PC{0,48}") {
                let _ = Message::parse(&line);
            }

            #[test]
            fn prop_channel_round_trip(
                channel in 1u8..=MAX_CHANNEL,
                value in -10_000.0f32..10_000.0,
                unit in "[a-zA-Z%]{1,8}",
            ) {
                let msg = ChannelMessage::new(channel, value, &unit);
                let parsed = Message::parse(&msg.encode()).unwrap();
                prop_assert_eq!(parsed, Message::Channel(msg));
            }
        }
    }
}
