//! Control protocol replies
//!
//! Reply codes and formatting, including the multi-line listing reply.

use log::warn;

use crate::listing::DirectoryEntry;
use crate::protocol::attrs::FileAttributes;

pub const OK: u16 = 200;
pub const READY: u16 = 220;
pub const GOODBYE: u16 = 221;
pub const LOGIN_SUCCESS: u16 = 230;
pub const ACTION_OK: u16 = 250;
pub const PASSWORD_REQUIRED: u16 = 331;
pub const SERVICE_UNAVAILABLE: u16 = 421;
pub const UNKNOWN_COMMAND: u16 = 500;
pub const SYNTAX_ERROR: u16 = 501;
pub const BAD_SEQUENCE: u16 = 503;
pub const NOT_LOGGED_IN: u16 = 530;

/// Format a single-line reply
pub fn format_response(code: u16, message: &str) -> String {
    format!("{} {}\r\n", code, message)
}

/// One entry as an RFC 3659 fact line. The leading space marks it as a
/// continuation line inside a multi-line reply.
///
/// `modify` is only reported when the store supplied a real timestamp.
/// Returns `None` for names holding CR or LF, which cannot be carried on a
/// single reply line.
pub fn format_entry(entry: &DirectoryEntry) -> Option<String> {
    if has_line_break(&entry.name) {
        return None;
    }

    let attrs = FileAttributes::from(entry);
    let kind = if entry.is_directory { "dir" } else { "file" };

    let mut facts = format!("type={};size={};", kind, attrs.size);
    if entry.modified_at.is_known() {
        facts.push_str(&format!(
            "modify={};",
            entry.modified_at.instant().format("%Y%m%d%H%M%S")
        ));
    }
    facts.push_str(&format!(
        "unix.mode={:04o};unix.uid={};unix.gid={};",
        attrs.permissions & 0o7777,
        attrs.uid,
        attrs.gid
    ));

    Some(format!(" {} {}\r\n", facts, entry.name))
}

/// Multi-line `250` reply carrying a whole listing.
///
/// Entries that cannot be rendered are left out and the closing count only
/// covers the lines actually sent.
pub fn format_listing(path: &str, entries: &[DirectoryEntry]) -> String {
    let path = path.replace(['\r', '\n'], " ");
    let mut reply = format!("{}-Listing {}\r\n", ACTION_OK, path);
    let mut rendered = 0usize;
    for entry in entries {
        match format_entry(entry) {
            Some(line) => {
                reply.push_str(&line);
                rendered += 1;
            }
            None => warn!("Skipping entry with line break in name: {:?}", entry.name),
        }
    }
    reply.push_str(&format_response(
        ACTION_OK,
        &format!("End ({} entries)", rendered),
    ));
    reply
}

fn has_line_break(text: &str) -> bool {
    text.contains(['\r', '\n'])
}
