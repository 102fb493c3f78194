use crate::error::DecodeError;
use crate::types::{ActivityStatus, Course};

use super::{check_len, get_str, put_str, Record};

pub const COURSE_ID_LEN: usize = 10;
pub const COURSE_NAME_LEN: usize = 50;

/// Layout: id(10) name(50) credit(1) academic_year(2, LE) semester(1) status(1).
impl Record for Course {
    const SIZE: usize = COURSE_ID_LEN + COURSE_NAME_LEN + 1 + 2 + 1 + 1;
    const KIND: &'static str = "course";

    fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::SIZE);
        put_str(&mut out, &self.course_id, COURSE_ID_LEN);
        put_str(&mut out, &self.course_name, COURSE_NAME_LEN);
        out.push(self.credit);
        out.extend_from_slice(&self.academic_year.to_le_bytes());
        out.push(self.semester);
        out.push(self.status.as_byte());
        out
    }

    fn decode(buf: &[u8]) -> Result<Self, DecodeError> {
        check_len(buf, Self::KIND, Self::SIZE)?;
        Ok(Course {
            course_id: get_str(&buf[0..10], Self::KIND, "course_id")?,
            course_name: get_str(&buf[10..60], Self::KIND, "course_name")?,
            credit: buf[60],
            academic_year: u16::from_le_bytes([buf[61], buf[62]]),
            semester: buf[63],
            status: ActivityStatus::from_byte(buf[64]),
        })
    }
}
