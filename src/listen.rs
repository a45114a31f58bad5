use anyhow::{Context, Result as AnyResult};
use serialport::ClearBuffer;
use std::io::{BufRead, BufReader, ErrorKind};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::config::DaemonConfig;
use crate::error::DaemonError;
use crate::port;
use crate::runner;
use crate::shell::ShellStrategy;
use crate::tokens::{CommandTable, Token, normalize};

/// Pause between polls when the wire is silent.
const IDLE_YIELD: Duration = Duration::from_millis(20);

/// Select a port, open it, and dispatch tokens until interrupted. The
/// serial handle lives inside the reader and is closed on every exit path.
pub fn run(
    cfg: &DaemonConfig,
    table: &CommandTable,
    shell: ShellStrategy,
) -> Result<(), DaemonError> {
    let candidates = port::detect_candidates();
    let device =
        port::select_port(cfg.port.as_deref(), &candidates).ok_or(DaemonError::NoPorts)?;

    let serial = port::open_port(&device, cfg.baud)?;
    serial
        .clear(ClearBuffer::Input)
        .context("clearing input buffer")?;
    println!(
        "[listen] {device} @ {} | project: {}",
        cfg.baud,
        cfg.project_dir.display()
    );

    let stop = Arc::new(AtomicBool::new(false));
    {
        let stop = Arc::clone(&stop);
        ctrlc::set_handler(move || stop.store(true, Ordering::SeqCst))
            .context("installing interrupt handler")?;
    }

    let reader = BufReader::new(serial);
    let interrupted = pump(reader, &stop, table, |command| {
        runner::run(command, &cfg.project_dir, shell)
    })?;
    if interrupted {
        println!("[listen] terminated by user");
    }
    Ok(())
}

/// The dispatch loop proper: one token per line, commands strictly
/// sequential. Bytes accumulate across read timeouts so a token split over
/// several reads is never dispatched in pieces; a read of zero bytes means
/// the stream ended and terminates the loop cleanly.
fn pump<R: BufRead>(
    mut reader: R,
    stop: &AtomicBool,
    table: &CommandTable,
    mut exec: impl FnMut(&str) -> AnyResult<i32>,
) -> Result<bool, DaemonError> {
    let mut acc: Vec<u8> = Vec::new();
    loop {
        if stop.load(Ordering::SeqCst) {
            return Ok(true);
        }
        match reader.read_until(b'\n', &mut acc) {
            Ok(0) => return Ok(false),
            Ok(_) if acc.last() != Some(&b'\n') => continue,
            Ok(_) => {}
            Err(e) if e.kind() == ErrorKind::TimedOut => {
                std::thread::sleep(IDLE_YIELD);
                continue;
            }
            Err(e) => return Err(anyhow::Error::new(e).context("serial read").into()),
        }
        let line = normalize(&decode_dropping_noise(&acc));
        acc.clear();
        if line.is_empty() {
            std::thread::sleep(IDLE_YIELD);
            continue;
        }
        match line.parse::<Token>() {
            Ok(token) => {
                println!("[listen] token {line}");
                exec(table.command(token))?;
            }
            Err(()) => println!("[listen] ignored: {line}"),
        }
    }
}

/// Permissive decode: invalid UTF-8 sequences are dropped, never surfaced.
/// Glitch bytes around MCU resets must not take the daemon down.
fn decode_dropping_noise(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).replace('\u{FFFD}', "")
}
