//! Human-readable tree dumps for debugging.

use std::io::Write;

use termcolor::{Buffer, Color, ColorSpec, WriteColor};

use crate::{
    Core,
    error::{Error, Result},
    id::NodeId,
};

/// Render the subtree under `root` with ANSI colour: one entry per widget,
/// with its geometry, stacking index and queue depths.
pub fn dump(core: &Core, root: NodeId) -> Result<String> {
    let mut buffer = Buffer::ansi();
    dump_node(&mut buffer, core, root, 0)?;
    Ok(String::from_utf8_lossy(buffer.as_slice()).into_owned())
}

/// Render the subtree under `root` without colour.
pub fn dump_plain(core: &Core, root: NodeId) -> Result<String> {
    let mut buffer = Buffer::no_color();
    dump_node(&mut buffer, core, root, 0)?;
    Ok(String::from_utf8_lossy(buffer.as_slice()).into_owned())
}

/// Write text in a colour, then reset.
fn colored(buffer: &mut Buffer, spec: &ColorSpec, text: &str) -> Result<()> {
    buffer.set_color(spec)?;
    write!(buffer, "{text}")?;
    buffer.reset()?;
    Ok(())
}

/// Write an indented label and value.
fn write_field(buffer: &mut Buffer, indent: &str, label: &str, value: &str) -> Result<()> {
    write!(buffer, "{indent}  ")?;
    colored(buffer, ColorSpec::new().set_fg(Some(Color::Green)), label)?;
    writeln!(buffer, " {value}")?;
    Ok(())
}

/// Emit one node and recurse into its children, front-most first.
fn dump_node(buffer: &mut Buffer, core: &Core, id: NodeId, level: usize) -> Result<()> {
    let node = core.node(id).ok_or(Error::NodeNotFound(id))?;
    let indent = "    ".repeat(level);

    write!(buffer, "{indent}")?;
    let name = match (id == core.root_id(), node.type_name()) {
        (true, _) => "root".to_string(),
        (false, Some(name)) => format!("{name} {id:?}"),
        (false, None) => format!("{id:?}"),
    };
    colored(
        buffer,
        ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true),
        &name,
    )?;

    let mut markers = Vec::new();
    if core.has_focus(id) {
        markers.push(("focused", Color::Magenta));
    }
    if !node.is_visible() {
        markers.push(("hidden", Color::Yellow));
    }
    if node.is_modal() {
        markers.push(("modal", Color::Red));
    }
    for (i, (marker, color)) in markers.iter().enumerate() {
        write!(buffer, "{}", if i == 0 { " " } else { ", " })?;
        colored(buffer, ColorSpec::new().set_fg(Some(*color)), marker)?;
    }
    writeln!(buffer)?;

    let r = node.rect();
    write_field(
        buffer,
        &indent,
        "rect:",
        &format!("x: {}, y: {}, w: {}, h: {}", r.tl.x, r.tl.y, r.w, r.h),
    )?;
    write_field(buffer, &indent, "z:", &node.z_index().to_string())?;
    if node.pending_updates() > 0 || node.pending_dirty() > 0 {
        write_field(
            buffer,
            &indent,
            "queued:",
            &format!(
                "{} updates, {} dirty",
                node.pending_updates(),
                node.pending_dirty()
            ),
        )?;
    }

    for child in node.children() {
        dump_node(buffer, core, *child, level + 1)?;
    }
    Ok(())
}
