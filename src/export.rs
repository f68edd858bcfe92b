//! Offline inspection formats: a semicolon-separated move log and a
//! Graphviz dump of the search tree.

use std::io::{self, Write};

use crate::eval::score_for_side;
use crate::mcts::{NodeId, Tree};
use crate::state::Player;

/// Child columns reserved in the CSV header.
const CSV_CHILD_COLUMNS: usize = 20;

pub fn write_csv_header<W: Write>(w: &mut W) -> io::Result<()> {
    write!(w, "id; state; a1; a2; u1; u2; wins; losses; visits; ratio; next")?;
    for i in 0..CSV_CHILD_COLUMNS {
        write!(w, "; q{i:02}; n{i:02}")?;
    }
    writeln!(w)
}

/// One line per decision: the node's stats, the chosen child (0 if none),
/// then `losses; visits` for each child by descending visits. Nodes that
/// were never searched report a ratio of 0.
pub fn write_csv_row<W: Write>(
    w: &mut W,
    tree: &Tree,
    id: NodeId,
    next: Option<NodeId>,
) -> io::Result<()> {
    let node = tree.node(id);
    let state = node.state();
    let ratio = if node.is_visited() {
        node.win_ratio(state.player)
    } else {
        0.0
    };
    write!(
        w,
        "{}; {}; {}; {}; {}; {}; {}; {}; {}; {}; {}",
        node.id(),
        state,
        state.army1.size(),
        state.army2.size(),
        score_for_side(state, Player::One),
        score_for_side(state, Player::Two),
        node.win_count(),
        node.loss_count(),
        node.visit_count(),
        ratio,
        next.unwrap_or(0)
    )?;
    for c in tree.children_by_visits(id) {
        let child = tree.node(c);
        write!(w, "; {}; {}", child.loss_count(), child.visit_count())?;
    }
    writeln!(w)
}

/// Graphviz digraph of `root`'s children plus every sibling set along the
/// line that led to `last`.
pub fn write_dot<W: Write>(w: &mut W, tree: &Tree, root: NodeId, last: NodeId) -> io::Result<()> {
    writeln!(w, "digraph mcts {{")?;
    writeln!(w, "node [style=filled];")?;
    write_node(w, tree, None, root)?;
    for id in tree.path_to_root(last) {
        let shape = match tree.node(id).state().player {
            Player::One => "house",
            Player::Two => "invhouse",
        };
        writeln!(w, "n{id} [shape={shape}];")?;
        for &c in tree.children(id) {
            write_node(w, tree, Some(id), c)?;
        }
    }
    writeln!(w, "}}")
}

fn write_node<W: Write>(
    w: &mut W,
    tree: &Tree,
    parent: Option<NodeId>,
    id: NodeId,
) -> io::Result<()> {
    let node = tree.node(id);
    let player = node.state().player;
    let winning = if node.win_count() > node.loss_count() {
        player
    } else {
        player.opponent()
    };
    let hue = match winning {
        Player::One => 0.0,
        Player::Two => 0.66,
    };
    let saturation = if node.is_visited() {
        (node.win_ratio(winning) - 0.5).clamp(0.0, 1.0)
    } else {
        0.0
    };

    writeln!(
        w,
        "n{} [label=\"{}\\n{}\", fillcolor=\"{} {} 1.0\"];",
        id,
        node.win_count(),
        node.visit_count(),
        hue,
        saturation
    )?;
    if let Some(p) = parent {
        writeln!(w, "n{p} -> n{id};")?;
    }
    Ok(())
}
