//! Text and JSON rendering of results.
//!
//! Text output uses one `key=value` line per non-empty field, in the same
//! shape as `git config --list`, so it can be consumed by shell scripts.

use std::io::{self, Write};

use endpoint::{Access, Endpoint};

/// Selected output format.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Format {
    Text,
    #[cfg(feature = "serde")]
    Json,
}

/// Writes an endpoint, followed by its access mode when known.
pub(crate) fn write_endpoint<W: Write>(
    out: &mut W,
    format: Format,
    endpoint: &Endpoint,
    access: Option<&Access>,
) -> io::Result<()> {
    match format {
        Format::Text => {
            write_field(out, "url", endpoint.url())?;
            if let Some(operation) = endpoint.operation() {
                write_field(out, "operation", operation.as_str())?;
            }
            write_field(out, "original_url", endpoint.original_url())?;
            let ssh = endpoint.ssh_metadata();
            write_field(out, "ssh.user_and_host", ssh.user_and_host())?;
            write_field(out, "ssh.path", ssh.path())?;
            write_field(out, "ssh.port", ssh.port())?;
            if let Some(access) = access {
                write_field(out, "access", access.mode().as_str())?;
            }
            Ok(())
        }
        #[cfg(feature = "serde")]
        Format::Json => {
            let value = match access {
                Some(access) => serde_json::json!({ "endpoint": endpoint, "access": access }),
                None => serde_json::json!({ "endpoint": endpoint }),
            };
            write_json(out, &value)
        }
    }
}

/// Writes an access value.
pub(crate) fn write_access<W: Write>(out: &mut W, format: Format, access: &Access) -> io::Result<()> {
    match format {
        Format::Text => {
            write_field(out, "url", access.url())?;
            write_field(out, "mode", access.mode().as_str())?;
            writeln!(out, "private={}", access.is_private())
        }
        #[cfg(feature = "serde")]
        Format::Json => write_json(
            out,
            &serde_json::json!({ "access": access, "private": access.is_private() }),
        ),
    }
}

/// Writes a bare remote URL.
pub(crate) fn write_remote_url<W: Write>(out: &mut W, format: Format, url: &str) -> io::Result<()> {
    match format {
        Format::Text => writeln!(out, "{url}"),
        #[cfg(feature = "serde")]
        Format::Json => write_json(out, &serde_json::json!({ "url": url })),
    }
}

fn write_field<W: Write>(out: &mut W, key: &str, value: &str) -> io::Result<()> {
    if value.is_empty() {
        return Ok(());
    }
    writeln!(out, "{key}={value}")
}

#[cfg(feature = "serde")]
fn write_json<W: Write>(out: &mut W, value: &serde_json::Value) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}
