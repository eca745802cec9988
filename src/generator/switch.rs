//! `switch` / `case` / `default` blocks for templates.
//!
//! ```text
//! {% switch field.type %}
//!   {% case "date", "dateTime" %}<q-date ... />
//!   {% case "checkbox" %}<q-checkbox ... />
//!   {% default %}<q-input ... />
//! {% endswitch %}
//! ```
//!
//! The engine has no such construct, so sources are rewritten into an
//! `if` / `elif` / `else` chain before they are registered. The first case
//! listing a value equal to the subject wins; `default` runs when none does.
//! Switches nest freely: each one is an independent frame on a stack that
//! lives only for the duration of one [`expand_switch_blocks`] call.

use once_cell::sync::Lazy;
use regex::Regex;

#[allow(clippy::expect_used)]
static TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)\{%(-?)\s*(switch|case|default|endswitch)\b(.*?)(-?)%\}")
        .expect("switch tag pattern is valid")
});

/// A malformed switch block. Lines are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SwitchError {
    #[error("line {line}: `{tag}` outside of a switch block")]
    Stray { tag: &'static str, line: usize },

    #[error("line {line}: `case` after `default`")]
    CaseAfterDefault { line: usize },

    #[error("line {line}: second `default` in the same switch")]
    DuplicateDefault { line: usize },

    #[error("line {line}: switch block is never closed")]
    Unclosed { line: usize },

    #[error("line {line}: content between `switch` and its first `case`")]
    ContentBeforeCase { line: usize },

    #[error("line {line}: `{tag}` needs an expression")]
    MissingExpression { tag: &'static str, line: usize },
}

#[derive(Debug, PartialEq, Eq)]
enum Arm {
    /// No case or default seen yet
    Opening,
    Cases,
    Default,
}

#[derive(Debug)]
struct Frame {
    subject: String,
    line: usize,
    /// Left trim marker of the `switch` tag, carried onto the first arm
    trim_left: bool,
    arm: Arm,
}

fn dash(trim: bool) -> &'static str {
    if trim {
        "-"
    } else {
        ""
    }
}

fn tag(trim_left: bool, body: &str, trim_right: bool) -> String {
    format!("{{%{} {} {}%}}", dash(trim_left), body, dash(trim_right))
}

fn line_at(src: &str, offset: usize) -> usize {
    src[..offset].bytes().filter(|b| *b == b'\n').count() + 1
}

/// Rewrite every switch block of `src` into plain conditionals.
///
/// Sources without switch blocks come back unchanged. Trim markers on the
/// switch tags are kept on the generated tags.
pub fn expand_switch_blocks(src: &str) -> Result<String, SwitchError> {
    let mut out = String::with_capacity(src.len());
    let mut stack: Vec<Frame> = Vec::new();
    let mut cursor = 0;

    for caps in TAG.captures_iter(src) {
        let Some(whole) = caps.get(0) else { continue };
        let line = line_at(src, whole.start());
        let between = &src[cursor..whole.start()];
        cursor = whole.end();

        match stack.last() {
            Some(frame) if frame.arm == Arm::Opening => {
                if !between.trim().is_empty() {
                    return Err(SwitchError::ContentBeforeCase {
                        line: line_at(src, whole.start() - between.len()),
                    });
                }
            }
            _ => out.push_str(between),
        }

        let trim_left = !caps[1].is_empty();
        let keyword = &caps[2];
        let expr = caps[3].trim();
        let trim_right = !caps[4].is_empty();

        match keyword {
            "switch" => {
                if expr.is_empty() {
                    return Err(SwitchError::MissingExpression { tag: "switch", line });
                }
                stack.push(Frame {
                    subject: expr.to_string(),
                    line,
                    trim_left,
                    arm: Arm::Opening,
                });
            }
            "case" => {
                let frame = stack
                    .last_mut()
                    .ok_or(SwitchError::Stray { tag: "case", line })?;
                if expr.is_empty() {
                    return Err(SwitchError::MissingExpression { tag: "case", line });
                }
                let test = format!("({}) in [{}]", frame.subject, expr);
                match frame.arm {
                    Arm::Opening => {
                        out.push_str(&tag(frame.trim_left, &format!("if {test}"), trim_right));
                        frame.arm = Arm::Cases;
                    }
                    Arm::Cases => out.push_str(&tag(trim_left, &format!("elif {test}"), trim_right)),
                    Arm::Default => return Err(SwitchError::CaseAfterDefault { line }),
                }
            }
            "default" => {
                let frame = stack
                    .last_mut()
                    .ok_or(SwitchError::Stray { tag: "default", line })?;
                match frame.arm {
                    Arm::Opening => out.push_str(&tag(frame.trim_left, "if true", trim_right)),
                    Arm::Cases => out.push_str(&tag(trim_left, "else", trim_right)),
                    Arm::Default => return Err(SwitchError::DuplicateDefault { line }),
                }
                frame.arm = Arm::Default;
            }
            _ => {
                let frame = stack
                    .pop()
                    .ok_or(SwitchError::Stray { tag: "endswitch", line })?;
                if frame.arm != Arm::Opening {
                    out.push_str(&tag(trim_left, "endif", trim_right));
                }
            }
        }
    }

    if let Some(frame) = stack.last() {
        return Err(SwitchError::Unclosed { line: frame.line });
    }
    out.push_str(&src[cursor..]);
    Ok(out)
}
