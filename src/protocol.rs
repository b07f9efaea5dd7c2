//! Line protocol spoken between the board and its host controller.
//!
//! Lines are ASCII, comma separated and newline terminated. The first field
//! is a single command byte:
//!
//! ```text
//! P,r1,g1,b1,r2,g2,b2,brightness,launch,gradient,explode,laser,mirror,count,speed
//! S,...   same fields, store the effect
//! V,...   same fields, preview the effect
//! T,<type>,<name>[,<value>...]
//! ```
//!
//! Effect lines written by the first firmware revision carry 13 fields, with
//! no gradient or explode code; they decode with [`GradientMode::Gradient`]
//! and [`ExplodeMode::Normal`]. A line that equals a mode name
//! (`"IDLE MODE"`, ...) announces a mode change.

use core::fmt::Write;

use heapless::{String, Vec};

use crate::color::Rgb;
use crate::config::{
    MAX_LINE_LENGTH, MAX_TEST_VALUES, MAX_TOKEN_LENGTH, MSG_PLAY_EFFECT, MSG_PREVIEW,
    MSG_SAVE_EFFECT, MSG_TEST_DATA,
};
use crate::effect::{EffectError, FireworkEffect};
use crate::state::SystemState;
use crate::types::{
    ExplodeMode, ExplodeModeRevision, GradientMode, InvalidModeCode, LegacyExplodeMode,
};

/// Room for [`MAX_LINE_LENGTH`] bytes of content plus the `\n`.
const LINE_CAPACITY: usize = MAX_LINE_LENGTH + 1;

/// An encoded protocol line, newline included.
pub type Line = String<LINE_CAPACITY>;

/// A bounded text token of a test-data line.
pub type Token = String<MAX_TOKEN_LENGTH>;

const V1_FIELD_COUNT: usize = 13;
const V2_FIELD_COUNT: usize = 15;

/// Layout revision of an effect line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameRevision {
    /// 13 fields, no gradient or explode code.
    V1,
    /// 15 fields.
    V2,
}

/// Errors produced while decoding or encoding a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProtocolError {
    /// Nothing but whitespace.
    EmptyLine,

    /// First field is not a known command byte.
    UnknownCommand(u8),

    /// The line has the wrong number of comma-separated fields.
    FieldCount { found: usize },

    /// A numeric field is not a number, or does not fit its type.
    InvalidNumber { field: usize },

    /// A mode field holds a code outside its variant set.
    InvalidModeCode { field: usize, code: u8 },

    /// The effect decoded but a field is out of range.
    InvalidEffect(EffectError),

    /// Line content longer than [`MAX_LINE_LENGTH`].
    LineTooLong,

    /// A test-data token longer than [`MAX_TOKEN_LENGTH`].
    TokenTooLong { field: usize },

    /// A test-data token holds a comma, a control character or surrounding
    /// whitespace, so it would not decode back to itself.
    InvalidToken { field: usize },

    /// More than [`MAX_TEST_VALUES`] test-data values.
    TooManyValues,

    /// Received bytes are not valid UTF-8.
    InvalidUtf8,
}

impl core::fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ProtocolError::EmptyLine => write!(f, "empty line"),
            ProtocolError::UnknownCommand(byte) => {
                write!(f, "unknown command byte 0x{:02x}", byte)
            }
            ProtocolError::FieldCount { found } => {
                write!(f, "unexpected field count {}", found)
            }
            ProtocolError::InvalidNumber { field } => {
                write!(f, "field {} is not a valid number", field)
            }
            ProtocolError::InvalidModeCode { field, code } => {
                write!(f, "field {} holds unknown mode code {}", field, code)
            }
            ProtocolError::InvalidEffect(err) => write!(f, "invalid effect: {}", err),
            ProtocolError::LineTooLong => {
                write!(f, "line exceeds {} bytes", MAX_LINE_LENGTH)
            }
            ProtocolError::TokenTooLong { field } => {
                write!(f, "field {} exceeds {} bytes", field, MAX_TOKEN_LENGTH)
            }
            ProtocolError::InvalidToken { field } => {
                write!(f, "field {} is not a valid token", field)
            }
            ProtocolError::TooManyValues => {
                write!(f, "more than {} test values", MAX_TEST_VALUES)
            }
            ProtocolError::InvalidUtf8 => write!(f, "line is not valid UTF-8"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ProtocolError {}

impl From<EffectError> for ProtocolError {
    fn from(err: EffectError) -> Self {
        ProtocolError::InvalidEffect(err)
    }
}

/// A measurement reported by the board for offline analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TestData {
    pub kind: Token,
    pub name: Token,
    pub values: Vec<Token, MAX_TEST_VALUES>,
}

impl TestData {
    /// Creates a test-data record with no values.
    ///
    /// # Errors
    /// `TokenTooLong` or `InvalidToken` for a token that cannot be sent.
    pub fn new(kind: &str, name: &str) -> Result<Self, ProtocolError> {
        Ok(Self {
            kind: token(1, kind)?,
            name: token(2, name)?,
            values: Vec::new(),
        })
    }

    /// Appends one value.
    ///
    /// # Errors
    /// `TooManyValues` past [`MAX_TEST_VALUES`], otherwise as [`TestData::new`].
    pub fn push_value(&mut self, value: &str) -> Result<(), ProtocolError> {
        let value = token(3 + self.values.len(), value)?;
        self.values
            .push(value)
            .map_err(|_| ProtocolError::TooManyValues)
    }

    /// Checks every token the way the decoder would see it.
    fn validate(&self) -> Result<(), ProtocolError> {
        let tokens = [&self.kind, &self.name].into_iter().chain(&self.values);
        for (index, text) in tokens.enumerate() {
            check_token(index + 1, text)?;
        }
        Ok(())
    }
}

/// One decoded protocol line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    /// `S`: store the effect.
    SaveEffect(FireworkEffect),
    /// `P`: play the effect.
    PlayEffect(FireworkEffect),
    /// `V`: preview the effect.
    Preview(FireworkEffect),
    /// `T`: test data.
    TestData(TestData),
    /// Mode announcement.
    Mode(SystemState),
}

impl Message {
    /// Command byte that starts this message's line, if it has one.
    pub fn command_byte(&self) -> Option<u8> {
        match self {
            Message::SaveEffect(_) => Some(MSG_SAVE_EFFECT),
            Message::PlayEffect(_) => Some(MSG_PLAY_EFFECT),
            Message::Preview(_) => Some(MSG_PREVIEW),
            Message::TestData(_) => Some(MSG_TEST_DATA),
            Message::Mode(_) => None,
        }
    }

    /// The effect carried by `S`, `P` and `V` lines.
    pub fn effect(&self) -> Option<&FireworkEffect> {
        match self {
            Message::SaveEffect(effect)
            | Message::PlayEffect(effect)
            | Message::Preview(effect) => Some(effect),
            Message::TestData(_) | Message::Mode(_) => None,
        }
    }

    /// Encodes the message as a current-revision line.
    pub fn encode(&self) -> Result<Line, ProtocolError> {
        self.encode_as(FrameRevision::V2)
    }

    /// Encodes the message in the given effect-line layout.
    ///
    /// [`FrameRevision::V1`] drops the gradient and explode codes.
    ///
    /// # Errors
    /// * `LineTooLong` - the encoded line does not fit a [`Line`]
    /// * `InvalidToken` - a test-data token would change the line's fields
    pub fn encode_as(&self, revision: FrameRevision) -> Result<Line, ProtocolError> {
        if let Message::TestData(data) = self {
            data.validate()?;
        }

        let mut line = Line::new();
        self.write_to(&mut line, revision)
            .map_err(|_| ProtocolError::LineTooLong)?;
        Ok(line)
    }

    fn write_to(&self, line: &mut Line, revision: FrameRevision) -> core::fmt::Result {
        match self {
            Message::Mode(state) => writeln!(line, "{}", state.mode_name()),
            Message::TestData(data) => {
                write!(line, "{},{},{}", MSG_TEST_DATA as char, data.kind, data.name)?;
                for value in &data.values {
                    write!(line, ",{}", value)?;
                }
                writeln!(line)
            }
            Message::SaveEffect(effect)
            | Message::PlayEffect(effect)
            | Message::Preview(effect) => {
                let command = self.command_byte().unwrap_or(MSG_PLAY_EFFECT) as char;
                let (c1, c2) = (effect.color1, effect.color2);
                write!(
                    line,
                    "{},{},{},{},{},{},{},{},{}",
                    command, c1.r, c1.g, c1.b, c2.r, c2.g, c2.b, effect.max_brightness,
                    effect.launch_mode.code()
                )?;
                if revision == FrameRevision::V2 {
                    write!(
                        line,
                        ",{},{}",
                        effect.gradient_mode.code(),
                        effect.explode_mode.code()
                    )?;
                }
                writeln!(
                    line,
                    ",{},{},{},{}",
                    effect.laser_color.code(),
                    effect.mirror_angle,
                    effect.explosion_led_count,
                    effect.speed_delay
                )
            }
        }
    }
}

/// Resolves an explode code written under `revision`.
pub fn explode_mode_from_code(
    code: u8,
    revision: FrameRevision,
) -> Result<ExplodeModeRevision, InvalidModeCode> {
    match revision {
        FrameRevision::V1 => LegacyExplodeMode::try_from(code).map(ExplodeModeRevision::V1),
        FrameRevision::V2 => ExplodeMode::try_from(code).map(ExplodeModeRevision::V2),
    }
}

/// Decodes one line. A trailing `\r\n` or `\n` is ignored.
///
/// # Errors
/// See [`ProtocolError`].
pub fn parse_line(line: &str) -> Result<Message, ProtocolError> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.len() > MAX_LINE_LENGTH {
        return Err(ProtocolError::LineTooLong);
    }

    let line = line.trim();
    if line.is_empty() {
        return Err(ProtocolError::EmptyLine);
    }

    if let Some(state) = SystemState::from_mode_name(line) {
        return Ok(Message::Mode(state));
    }

    let mut fields: Vec<&str, V2_FIELD_COUNT> = Vec::new();
    let mut found = 0;
    for field in line.split(',') {
        found += 1;
        // Extra fields only matter for the count reported below.
        let _ = fields.push(field.trim());
    }

    let command = match fields[0].as_bytes() {
        [byte] => *byte,
        bytes => return Err(ProtocolError::UnknownCommand(bytes.first().copied().unwrap_or(0))),
    };

    match command {
        MSG_TEST_DATA => parse_test_data(line),
        MSG_SAVE_EFFECT | MSG_PLAY_EFFECT | MSG_PREVIEW => {
            if found > V2_FIELD_COUNT {
                return Err(ProtocolError::FieldCount { found });
            }
            let (effect, _) = parse_effect(&fields)?;
            Ok(match command {
                MSG_SAVE_EFFECT => Message::SaveEffect(effect),
                MSG_PREVIEW => Message::Preview(effect),
                _ => Message::PlayEffect(effect),
            })
        }
        other => Err(ProtocolError::UnknownCommand(other)),
    }
}

/// Decodes the fields of an effect line, command field included.
///
/// Returns the effect together with the layout revision it was written in.
pub fn parse_effect(fields: &[&str]) -> Result<(FireworkEffect, FrameRevision), ProtocolError> {
    let revision = match fields.len() {
        V1_FIELD_COUNT => FrameRevision::V1,
        V2_FIELD_COUNT => FrameRevision::V2,
        found => return Err(ProtocolError::FieldCount { found }),
    };

    let mut reader = FieldReader { fields, index: 1 };

    let color1 = reader.rgb()?;
    let color2 = reader.rgb()?;
    let max_brightness = reader.number::<u8>()?;
    let launch_mode = reader.mode()?;

    let (gradient_mode, explode_mode) = match revision {
        FrameRevision::V1 => (GradientMode::Gradient, ExplodeMode::Normal),
        FrameRevision::V2 => {
            let gradient_mode = reader.mode()?;
            let field = reader.index;
            let code = reader.number::<u8>()?;
            let explode = explode_mode_from_code(code, revision)
                .map_err(|err| ProtocolError::InvalidModeCode { field, code: err.0 })?;
            (gradient_mode, explode.current())
        }
    };

    let effect = FireworkEffect {
        color1,
        color2,
        max_brightness,
        launch_mode,
        gradient_mode,
        explode_mode,
        laser_color: reader.mode()?,
        mirror_angle: reader.number()?,
        explosion_led_count: reader.number()?,
        speed_delay: reader.number()?,
    };
    effect.validate()?;

    Ok((effect, revision))
}

fn parse_test_data(line: &str) -> Result<Message, ProtocolError> {
    let found = line.split(',').count();
    if found < 3 {
        return Err(ProtocolError::FieldCount { found });
    }

    let mut fields = line.split(',').map(str::trim).enumerate().skip(1);
    let mut next_token = || match fields.next() {
        Some((field, text)) => token(field, text),
        None => Err(ProtocolError::FieldCount { found }),
    };

    let kind = next_token()?;
    let name = next_token()?;

    let mut values = Vec::new();
    for (field, text) in fields {
        values
            .push(token(field, text)?)
            .map_err(|_| ProtocolError::TooManyValues)?;
    }

    Ok(Message::TestData(TestData { kind, name, values }))
}

fn check_token(field: usize, text: &str) -> Result<(), ProtocolError> {
    let splits = text.contains(|c: char| c == ',' || c.is_control());
    if splits || text.trim() != text {
        return Err(ProtocolError::InvalidToken { field });
    }
    Ok(())
}

fn token(field: usize, text: &str) -> Result<Token, ProtocolError> {
    check_token(field, text)?;
    let mut token = Token::new();
    token
        .push_str(text)
        .map_err(|_| ProtocolError::TokenTooLong { field })?;
    Ok(token)
}

struct FieldReader<'a> {
    fields: &'a [&'a str],
    index: usize,
}

impl FieldReader<'_> {
    fn next(&mut self) -> Result<&str, ProtocolError> {
        let field = self.index;
        self.index += 1;
        self.fields
            .get(field)
            .copied()
            .ok_or(ProtocolError::FieldCount {
                found: self.fields.len(),
            })
    }

    fn number<T: core::str::FromStr>(&mut self) -> Result<T, ProtocolError> {
        let field = self.index;
        self.next()?
            .parse()
            .map_err(|_| ProtocolError::InvalidNumber { field })
    }

    fn mode<M: TryFrom<u8, Error = InvalidModeCode>>(&mut self) -> Result<M, ProtocolError> {
        let field = self.index;
        let code = self.number::<u8>()?;
        M::try_from(code).map_err(|err| ProtocolError::InvalidModeCode { field, code: err.0 })
    }

    fn rgb(&mut self) -> Result<Rgb, ProtocolError> {
        Ok(Rgb::new(self.number()?, self.number()?, self.number()?))
    }
}

/// Accumulates received bytes into lines and decodes each complete line.
///
/// Blank lines are skipped. A line that overflows the buffer is discarded up
/// to its newline and reported once as [`ProtocolError::LineTooLong`].
#[derive(Debug, Default)]
pub struct LineAssembler {
    buffer: Vec<u8, LINE_CAPACITY>,
    overflowed: bool,
}

impl LineAssembler {
    pub fn new() -> Self {
        Self {
            buffer: Vec::new(),
            overflowed: false,
        }
    }

    /// Feeds one received byte.
    ///
    /// # Returns
    /// * `Some(Ok(message))` - a complete line decoded
    /// * `Some(Err(err))` - a complete line failed to decode
    /// * `None` - line still incomplete, or blank
    pub fn push(&mut self, byte: u8) -> Option<Result<Message, ProtocolError>> {
        if byte != b'\n' {
            if self.buffer.push(byte).is_err() {
                self.overflowed = true;
            }
            return None;
        }

        let result = if core::mem::take(&mut self.overflowed) {
            Some(Err(ProtocolError::LineTooLong))
        } else {
            match core::str::from_utf8(&self.buffer) {
                Ok(text) if text.trim().is_empty() => None,
                Ok(text) => Some(parse_line(text)),
                Err(_) => Some(Err(ProtocolError::InvalidUtf8)),
            }
        };
        self.buffer.clear();

        #[cfg(feature = "defmt")]
        if let Some(Err(err)) = &result {
            defmt::warn!("dropping serial line: {}", err);
        }

        result
    }
}
