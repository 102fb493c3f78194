use crate::error::DecodeError;
use crate::types::{ActivityStatus, Student};

use super::{check_len, get_str, put_str, Record};

pub const STUDENT_ID_LEN: usize = 16;
pub const NAME_LEN: usize = 50;
pub const MAJOR_LEN: usize = 20;

/// Layout: id(16) first_name(50) last_name(50) major(20) year(1) status(1).
impl Record for Student {
    const SIZE: usize = STUDENT_ID_LEN + NAME_LEN + NAME_LEN + MAJOR_LEN + 1 + 1;
    const KIND: &'static str = "student";

    fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::SIZE);
        put_str(&mut out, &self.student_id, STUDENT_ID_LEN);
        put_str(&mut out, &self.first_name, NAME_LEN);
        put_str(&mut out, &self.last_name, NAME_LEN);
        put_str(&mut out, &self.major, MAJOR_LEN);
        out.push(self.year_level);
        out.push(self.status.as_byte());
        out
    }

    fn decode(buf: &[u8]) -> Result<Self, DecodeError> {
        check_len(buf, Self::KIND, Self::SIZE)?;
        let mut at = 0;
        let mut field = |width: usize| {
            let slice = &buf[at..at + width];
            at += width;
            slice
        };
        Ok(Student {
            student_id: get_str(field(STUDENT_ID_LEN), Self::KIND, "student_id")?,
            first_name: get_str(field(NAME_LEN), Self::KIND, "first_name")?,
            last_name: get_str(field(NAME_LEN), Self::KIND, "last_name")?,
            major: get_str(field(MAJOR_LEN), Self::KIND, "major")?,
            year_level: field(1)[0],
            status: ActivityStatus::from_byte(field(1)[0]),
        })
    }
}
