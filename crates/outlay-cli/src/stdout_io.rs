use std::io::{self, Write};

pub fn write_stdout_text(text: &str) -> io::Result<()> {
    write_tolerant(&mut io::stdout().lock(), text.as_bytes(), false)
}

pub fn write_stdout_line(text: &str) -> io::Result<()> {
    write_tolerant(&mut io::stdout().lock(), text.as_bytes(), true)
}

// A closed pipe (`outlay report | head`) is not a failure of the report.
fn write_tolerant<W: Write>(writer: &mut W, bytes: &[u8], newline: bool) -> io::Result<()> {
    let written = writer
        .write_all(bytes)
        .and_then(|()| if newline { writer.write_all(b"\n") } else { Ok(()) })
        .and_then(|()| writer.flush());
    match written {
        Err(error) if error.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}
