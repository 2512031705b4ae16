//! Point location.

use geom::Point;

use crate::{Core, id::NodeId};

/// Find the deepest visible widget under `p`, given in `container`'s outer
/// coordinates. Children are tried front-most first. A widget whose
/// clickable-alpha policy ignores the pixel under `p` is transparent to the
/// search, and the next candidate below it is tried.
pub(crate) fn locate(core: &Core, container: NodeId, p: Point) -> Option<NodeId> {
    let node = core.nodes.get(container)?;
    if container != core.root {
        let kind = core.registry.resolve(node.type_id);
        if let Some(alpha) = kind.alpha_at(node, p)
            && node.clickable.ignores(alpha)
        {
            return None;
        }
    }
    let inner = p - node.padding.origin();
    for child in &node.children {
        let Some(c) = core.nodes.get(*child) else {
            continue;
        };
        if !c.visible || !c.rect().contains_point(inner) {
            continue;
        }
        if let Some(hit) = locate(core, *child, inner - c.pos) {
            return Some(hit);
        }
    }
    Some(container)
}
