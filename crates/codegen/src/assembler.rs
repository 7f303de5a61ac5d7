//! Assembly of rendered operations into template-ready script bodies.

use std::collections::BTreeMap;

use model::ops::{MigrationScript, OpContainer};
use tracing::debug;

use crate::context::RenderContext;
use crate::error::RenderError;
use crate::render::render_op;

const HEADER_MARKER: &str = "### commands auto generated by moraine - please adjust! ###";
const FOOTER_MARKER: &str = "### end moraine commands ###";

const INDENT: &str = "    ";

const BLOCK_KEYWORDS: [&str; 11] = [
    "if", "try", "elif", "while", "for", "with", "def", "class", "else", "except", "finally",
];

/// Emits lines with block-structure tracking: a line ending in a colon
/// under a compound keyword indents what follows, and a blank line
/// steps back out. Continuation lines of a multi-line call are written
/// as-is, so only the first line carries the block indent.
struct LineWriter {
    buf: String,
    indent: usize,
}

impl LineWriter {
    fn new() -> Self {
        Self {
            buf: String::new(),
            indent: 0,
        }
    }

    fn writeline(&mut self, line: &str) {
        let stripped = line.trim_start();
        let is_comment = line.starts_with('#');
        let has_text = !(stripped.is_empty() || stripped.starts_with('#'));

        if !is_comment && !has_text && self.indent > 0 {
            self.indent -= 1;
        }

        for _ in 0..self.indent {
            self.buf.push_str(INDENT);
        }
        self.buf.push_str(line);
        self.buf.push('\n');

        if opens_block(line) {
            self.indent += 1;
        }
    }

    fn finish(self) -> String {
        self.buf
    }
}

fn opens_block(line: &str) -> bool {
    let mut rest = line.trim_end();
    if let Some(pos) = rest.rfind('#') {
        // A trailing comment only hides the colon when the colon comes
        // right before it.
        let head = &rest[..pos];
        if head.trim_end().ends_with(':') {
            rest = head;
        }
    }
    let rest = rest.trim_end();
    if !rest.ends_with(':') {
        return false;
    }
    let first = rest
        .split_whitespace()
        .next()
        .unwrap_or("")
        .trim_end_matches(':');
    BLOCK_KEYWORDS.contains(&first)
}

/// Renders a container's operations between the editable-region
/// markers. A container with no operations renders a lone `pass` so
/// the surrounding function stays syntactically valid.
pub fn render_cmd_body(
    ctx: &mut RenderContext<'_>,
    container: &OpContainer,
) -> Result<String, RenderError> {
    let mut writer = LineWriter::new();
    writer.writeline(HEADER_MARKER);

    if container.ops.is_empty() {
        writer.writeline("pass");
    } else {
        for op in &container.ops {
            for line in render_op(ctx, op)? {
                writer.writeline(&line);
            }
        }
    }

    writer.writeline(FOOTER_MARKER);
    Ok(writer.finish())
}

/// Indents a rendered body for splicing into a script template: every
/// line four spaces deep, outer whitespace trimmed so the template
/// supplies the first line's own indentation, trailing whitespace
/// removed per line.
pub fn indent_block(text: &str) -> String {
    let indented = text
        .lines()
        .map(|line| format!("{INDENT}{line}"))
        .collect::<Vec<_>>()
        .join("\n");
    indented
        .trim()
        .lines()
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Renders both directions of a migration script and returns the
/// template slots: one body per configured direction token plus the
/// accumulated `imports` block.
pub fn render_migration_script(
    ctx: &mut RenderContext<'_>,
    script: &MigrationScript,
) -> Result<BTreeMap<String, String>, RenderError> {
    let upgrade = render_cmd_body(ctx, &script.upgrade_ops)?;
    let downgrade = render_cmd_body(ctx, &script.downgrade_ops)?;

    let mut slots = BTreeMap::new();
    slots.insert(ctx.settings.upgrade_token.clone(), indent_block(&upgrade));
    slots.insert(
        ctx.settings.downgrade_token.clone(),
        indent_block(&downgrade),
    );
    slots.insert("imports".to_string(), ctx.sorted_imports().join("\n"));

    debug!(
        "rendered migration script with {} imports",
        ctx.imports.len()
    );
    Ok(slots)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_lines_indent_and_blank_lines_step_out() {
        let mut writer = LineWriter::new();
        writer.writeline("with op.batch_alter_table('t', schema=None) as batch_op:");
        writer.writeline("batch_op.drop_index('ix_a')");
        writer.writeline("");
        writer.writeline("op.drop_table('t')");

        assert_eq!(
            writer.finish(),
            "with op.batch_alter_table('t', schema=None) as batch_op:\n    \
             batch_op.drop_index('ix_a')\n\nop.drop_table('t')\n"
        );
    }

    #[test]
    fn continuation_lines_keep_their_own_indentation() {
        let mut writer = LineWriter::new();
        writer.writeline("op.create_table('t',\nsa.Column('id', sa.Integer())\n)");

        assert_eq!(
            writer.finish(),
            "op.create_table('t',\nsa.Column('id', sa.Integer())\n)\n"
        );
    }

    #[test]
    fn comment_lines_never_change_the_indent() {
        let mut writer = LineWriter::new();
        writer.writeline("with op.batch_alter_table('t', schema=None) as batch_op:");
        writer.writeline("# note");
        writer.writeline("batch_op.drop_index('ix_a')");

        assert_eq!(
            writer.finish(),
            "with op.batch_alter_table('t', schema=None) as batch_op:\n    \
             # note\n    batch_op.drop_index('ix_a')\n"
        );
    }

    #[test]
    fn calls_ending_in_colon_inside_strings_do_not_indent() {
        assert!(!opens_block("op.execute('select 1:')"));
        assert!(opens_block("with op.batch_alter_table('t') as batch_op:"));
        assert!(!opens_block("op.drop_table('t')"));
    }

    #[test]
    fn indent_block_trims_the_first_line_for_the_template() {
        let body = "# header\npass\n# footer\n";
        assert_eq!(indent_block(body), "# header\n    pass\n    # footer");
    }
}
