//! Chat command parsing
//!
//! A command looks like
//! `OT name|department|project name|OT date|time range|hours|reason`.

use crate::request::OvertimeRequest;
use thiserror::Error;

/// Prefix that marks a message as an overtime command
pub const COMMAND_PREFIX: &str = "OT";

/// Field delimiter
pub const FIELD_DELIMITER: char = '|';

/// Number of fields a command must carry
pub const FIELD_COUNT: usize = 7;

/// Reply sent when a command has the wrong number of fields
pub const USAGE_MESSAGE: &str = "รูปแบบไม่ถูกต้อง กรุณาส่ง:\n\
OT ชื่อ-นามสกุล|แผนก|ชื่อโครงการ|วันที่ทำ OT|เวลาเริ่ม-สิ้นสุด|ชั่วโมง|เหตุผล";

/// Reply sent once the PDF has been written
pub const CONFIRMATION_MESSAGE: &str = "สร้าง PDF เรียบร้อยแล้ว กรุณาดาวน์โหลดจากเซิร์ฟเวอร์";

/// Why a message did not produce a request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// The text does not start with the command prefix; not for us
    #[error("message is not an OT command")]
    NotACommand,

    /// The command has the wrong number of fields
    #[error("expected 7 fields, found {found}")]
    Format { found: usize },
}

/// Parse a chat message into an overtime request
///
/// Surrounding whitespace is ignored, the prefix is stripped, and each
/// `|`-separated segment is trimmed. Segments are not validated beyond
/// being present, so empty values are accepted.
///
/// # Example
/// ```
/// use ot_form::parse_command;
///
/// let request = parse_command("OT John Doe|Engineering|Project X|2024-05-01|09:00-12:00|3|Deadline")?;
/// assert_eq!(request.name, "John Doe");
/// assert_eq!(request.reason, "Deadline");
/// # Ok::<(), ot_form::CommandError>(())
/// ```
pub fn parse_command(text: &str) -> Result<OvertimeRequest, CommandError> {
    let body = text
        .trim()
        .strip_prefix(COMMAND_PREFIX)
        .ok_or(CommandError::NotACommand)?;

    let parts: Vec<String> = body
        .split(FIELD_DELIMITER)
        .map(|part| part.trim().to_string())
        .collect();

    let fields: [String; FIELD_COUNT] = parts
        .try_into()
        .map_err(|parts: Vec<String>| CommandError::Format { found: parts.len() })?;

    Ok(OvertimeRequest::from_fields(fields))
}
