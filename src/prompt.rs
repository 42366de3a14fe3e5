// line input for the interactive front end
use log::warn;
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

#[derive(Debug, PartialEq, Eq)]
pub enum Answer {
  /// One line with its line ending removed. Other whitespace is kept.
  Line(String),
  /// A line that was not valid UTF-8. It has been consumed.
  Invalid,
  /// End of input.
  Eof,
}

/// Writes `message` to `output` and reads one answer from `input`.
pub async fn ask<R, W>(input: &mut R, output: &mut W, message: &str) -> io::Result<Answer>
where
  R: AsyncBufRead + Unpin,
  W: AsyncWrite + Unpin,
{
  output.write_all(message.as_bytes()).await?;
  output.flush().await?;
  read_answer(input).await
}

pub async fn read_answer<R: AsyncBufRead + Unpin>(input: &mut R) -> io::Result<Answer> {
  let mut buf = Vec::new();
  if input.read_until(b'\n', &mut buf).await? == 0 {
    return Ok(Answer::Eof);
  }

  if buf.last() == Some(&b'\n') {
    buf.pop();
    if buf.last() == Some(&b'\r') {
      buf.pop();
    }
  }

  match String::from_utf8(buf) {
    Ok(line) => Ok(Answer::Line(line)),
    Err(e) => {
      warn!("dropping input line that is not UTF-8: {}", e);
      Ok(Answer::Invalid)
    }
  }
}
