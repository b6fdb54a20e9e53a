//! Binary persistence of student records.
//!
//! Each record is written with no padding, integers in native byte order:
//!
//! | field             | size                 |
//! |-------------------|----------------------|
//! | id                | 4                    |
//! | name length `n`   | 4                    |
//! | name (UTF-8)      | `n`                  |
//! | preferences       | 3 × 4                |
//! | exam score        | 4                    |
//! | got scholarship   | 1, nonzero is true   |
//!
//! The name length makes every record self-delimiting, so records follow each
//! other until the end of the stream.

use crate::error::{Error, Result};
use crate::model::{PREFERENCES, Student, StudentStore};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::Path;
use tracing::{error, info, instrument};

/// Append the encoding of `student` to `writer`.
pub fn encode<W: Write>(writer: &mut W, student: &Student) -> Result<()> {
    let len = i32::try_from(student.name.len()).map_err(|_| Error::NameTooLong {
        len: student.name.len(),
    })?;
    let mut record = Vec::with_capacity(4 * (3 + PREFERENCES) + student.name.len() + 1);
    record.extend_from_slice(&student.id.to_ne_bytes());
    record.extend_from_slice(&len.to_ne_bytes());
    record.extend_from_slice(student.name.as_bytes());
    for preference in student.preferences {
        record.extend_from_slice(&preference.to_ne_bytes());
    }
    record.extend_from_slice(&student.exam_score.to_ne_bytes());
    record.push(u8::from(student.got_scholarship));
    writer
        .write_all(&record)
        .map_err(|e| Error::io_unavailable("<stream>", e))
}

/// Read as many bytes as available up to `buf.len()`, returning the count.
fn fill<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut read = 0;
    while read < buf.len() {
        match reader.read(&mut buf[read..]) {
            Ok(0) => break,
            Ok(n) => read += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(read)
}

/// Iterator over the records of a stream. It stops after the first error.
pub struct Decoder<R> {
    reader: R,
    decoded: usize,
    done: bool,
}

impl<R: Read> Decoder<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            decoded: 0,
            done: false,
        }
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        let n = fill(&mut self.reader, buf).map_err(|e| Error::io_unavailable("<stream>", e))?;
        if n < buf.len() {
            return Err(Error::TruncatedRecord {
                loaded: self.decoded,
            });
        }
        Ok(())
    }

    fn read_i32(&mut self) -> Result<i32> {
        let mut buf = [0; 4];
        self.read_exact(&mut buf)?;
        Ok(i32::from_ne_bytes(buf))
    }

    fn corrupt(&self, reason: impl Into<String>) -> Error {
        Error::CorruptRecord {
            loaded: self.decoded,
            reason: reason.into(),
        }
    }

    /// Decode the next record, or `None` at a clean end of stream.
    fn decode(&mut self) -> Result<Option<Student>> {
        let mut id = [0; 4];
        match fill(&mut self.reader, &mut id).map_err(|e| Error::io_unavailable("<stream>", e))? {
            0 => return Ok(None),
            4 => {}
            _ => {
                return Err(Error::TruncatedRecord {
                    loaded: self.decoded,
                });
            }
        }
        let len = self.read_i32()?;
        let len = usize::try_from(len).map_err(|_| self.corrupt(format!("name length {len}")))?;
        let mut name = Vec::new();
        (&mut self.reader)
            .take(len as u64)
            .read_to_end(&mut name)
            .map_err(|e| Error::io_unavailable("<stream>", e))?;
        if name.len() < len {
            return Err(Error::TruncatedRecord {
                loaded: self.decoded,
            });
        }
        let name = String::from_utf8(name).map_err(|_| self.corrupt("name is not UTF-8"))?;
        let mut preferences = [0; PREFERENCES];
        for preference in &mut preferences {
            *preference = self.read_i32()?;
        }
        let exam_score = self.read_i32()?;
        let mut flag = [0; 1];
        self.read_exact(&mut flag)?;
        Ok(Some(Student {
            id: i32::from_ne_bytes(id),
            name,
            preferences,
            exam_score,
            got_scholarship: flag[0] != 0,
        }))
    }
}

impl<R: Read> Iterator for Decoder<R> {
    type Item = Result<Student>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.decode() {
            Ok(Some(student)) => {
                self.decoded += 1;
                Some(Ok(student))
            }
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Records read from a stream, with the error which stopped reading early.
#[derive(Debug)]
pub struct Decoded {
    pub students: Vec<Student>,
    pub error: Option<Error>,
}

impl Decoded {
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }
}

pub fn decode_all<R: Read>(reader: R) -> Decoded {
    let mut students = Vec::new();
    for record in Decoder::new(reader) {
        match record {
            Ok(student) => students.push(student),
            Err(error) => {
                return Decoded {
                    students,
                    error: Some(error),
                };
            }
        }
    }
    Decoded {
        students,
        error: None,
    }
}

pub fn encode_all<'a, W, I>(writer: &mut W, students: I) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a Student>,
{
    let mut count = 0;
    for student in students {
        encode(writer, student)?;
        count += 1;
    }
    Ok(count)
}

/// Write the store, in name order, to `path`.
#[instrument(skip(store))]
pub fn save(store: &StudentStore, path: &Path) -> Result<usize> {
    let file = File::create(path).map_err(|e| Error::io_unavailable(path, e))?;
    let mut writer = BufWriter::new(file);
    let count = encode_all(&mut writer, store.iter_sorted()).map_err(|e| at(e, path))?;
    writer.flush().map_err(|e| Error::io_unavailable(path, e))?;
    info!(records = count, "Saved student records");
    Ok(count)
}

/// Read every complete record of `path`. A damaged tail is reported as an
/// error and dropped.
#[instrument]
pub fn load(path: &Path) -> Result<Decoded> {
    let file = File::open(path).map_err(|e| Error::io_unavailable(path, e))?;
    let mut decoded = decode_all(BufReader::new(file));
    decoded.error = decoded.error.map(|e| at(e, path));
    match &decoded.error {
        None => info!(records = decoded.students.len(), "Loaded student records"),
        Some(error) => error!(
            records = decoded.students.len(),
            %error,
            "Stopped reading student records"
        ),
    }
    Ok(decoded)
}

fn at(error: Error, path: &Path) -> Error {
    match error {
        Error::IoUnavailable { source, .. } => Error::io_unavailable(path, source),
        other => other,
    }
}
