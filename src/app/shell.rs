use crate::app::commands::{execute, OutputFormat};
use crate::config::cli::{parse_shell_line, Command, ShellInput};
use crate::core::BookingApi;
use crate::utils::error::Result;
use serde::Serialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

/// 逐行執行指令直到 EOF 或 quit，回傳被拒絕的預約數量
pub async fn run_shell<A, R, W>(api: &A, reader: R, mut writer: W, json: bool) -> Result<usize>
where
    A: BookingApi + ?Sized,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let format = if json {
        OutputFormat::JsonLines
    } else {
        OutputFormat::Text
    };
    let mut lines = reader.lines();
    let mut rejected = 0;

    while let Some(line) = lines.next_line().await? {
        let command = match parse_shell_line(&line) {
            Ok(ShellInput::Empty) => continue,
            Ok(ShellInput::Quit) => break,
            Ok(ShellInput::Run(Command::Shell)) => {
                write_notice(&mut writer, format, "already in shell").await?;
                continue;
            }
            Ok(ShellInput::Run(command)) => command,
            Err(e) => {
                write_notice(&mut writer, format, e.to_string().trim_end()).await?;
                continue;
            }
        };

        tracing::debug!("shell command: {:?}", command);
        let output = execute(api, &command, format).await?;
        if output.rejected {
            rejected += 1;
        }
        writer.write_all(output.body.as_bytes()).await?;
        writer.flush().await?;
    }

    Ok(rejected)
}

#[derive(Serialize)]
struct ShellNotice<'a> {
    error: &'a str,
}

// JSON 模式下錯誤也以物件輸出
async fn write_notice<W>(writer: &mut W, format: OutputFormat, message: &str) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let body = if format.is_json() {
        format.render(&ShellNotice { error: message })?
    } else {
        format!("{}\n", message)
    };
    writer.write_all(body.as_bytes()).await?;
    Ok(())
}
