use crate::error::DecodeError;
use crate::types::{Registration, RegistrationStatus};

use super::{check_len, get_str, put_str, Record};

pub const REG_STUDENT_ID_LEN: usize = 16;
pub const REG_COURSE_ID_LEN: usize = 16;

/// Layout: register_id(4, LE) student_id(16) course_id(16) date(8, f64 LE)
/// status(1).
impl Record for Registration {
    const SIZE: usize = 4 + REG_STUDENT_ID_LEN + REG_COURSE_ID_LEN + 8 + 1;
    const KIND: &'static str = "registration";

    fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::SIZE);
        out.extend_from_slice(&self.register_id.to_le_bytes());
        put_str(&mut out, &self.student_id, REG_STUDENT_ID_LEN);
        put_str(&mut out, &self.course_id, REG_COURSE_ID_LEN);
        out.extend_from_slice(&self.registration_date.to_le_bytes());
        out.push(self.status.as_byte());
        out
    }

    fn decode(buf: &[u8]) -> Result<Self, DecodeError> {
        check_len(buf, Self::KIND, Self::SIZE)?;
        let mut date_bytes = [0u8; 8];
        date_bytes.copy_from_slice(&buf[36..44]);
        Ok(Registration {
            register_id: u32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]),
            student_id: get_str(&buf[4..20], Self::KIND, "student_id")?,
            course_id: get_str(&buf[20..36], Self::KIND, "course_id")?,
            registration_date: f64::from_le_bytes(date_bytes),
            status: RegistrationStatus::from_byte(buf[44]),
        })
    }
}
