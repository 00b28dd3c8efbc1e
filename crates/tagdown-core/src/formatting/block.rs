//! Block-level wrappers applied to fully captured inner text.

use crate::options::{CodeBlockStyle, Options};

/// Prefix every line with `> `, blank lines with a bare `>`.
pub fn prefix_with_block_quote(text: &str) -> String {
    let content = text.trim_matches('\n').trim_end();
    if content.trim().is_empty() {
        return String::new();
    }

    let quoted: Vec<String> = content
        .lines()
        .map(|line| {
            if line.trim().is_empty() {
                ">".to_string()
            } else {
                format!("> {}", line)
            }
        })
        .collect();

    format!("\n\n{}\n\n", quoted.join("\n"))
}

/// Render preformatted text as a code block in the configured style.
pub fn prefix_with_block_code(text: &str, options: &Options) -> String {
    let code = text.trim_start_matches('\n').trim_end();
    if code.is_empty() {
        return String::new();
    }

    match options.code_block_style {
        CodeBlockStyle::Indented => {
            let indented: Vec<String> = code
                .lines()
                .map(|line| {
                    if line.is_empty() {
                        String::new()
                    } else {
                        format!("    {}", line)
                    }
                })
                .collect();
            format!("\n\n{}\n\n", indented.join("\n"))
        }
        CodeBlockStyle::Fenced => {
            let fence = fence_for(code, &options.fence);
            format!("\n\n{}\n{}\n{}\n\n", fence, code, fence)
        }
    }
}

/// Lengthen the configured fence until it does not occur inside `code`.
fn fence_for(code: &str, fence: &str) -> String {
    let Some(fence_char) = fence.chars().next() else {
        return "```".to_string();
    };

    let longest_run = code
        .lines()
        .map(|line| {
            line.trim_start()
                .chars()
                .take_while(|&c| c == fence_char)
                .count()
        })
        .max()
        .unwrap_or(0);

    let len = fence.chars().count().max(longest_run + 1);
    fence_char.to_string().repeat(len)
}
