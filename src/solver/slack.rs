//! Slack redistribution.
//!
//! The highest fitting level usually leaves some height unused. When the
//! next level overflows (rather than being rejected outright), zones move
//! up to their next-level size one at a time, fill zones first, then
//! primaries, then the right column, stopping at the first move that no
//! longer fits. Row counts follow the next level's placement.

use tracing::trace;

use crate::core::ZoneDimensions;

use super::search::{Arrangement, Outcome, Stack};

#[derive(Clone, Copy, Debug)]
enum Step {
    Fill(usize),
    Primary(usize),
    Right,
}

/// Grow `arrangement` into the unused height. Returns the number of zones
/// moved, which is also recorded on the arrangement.
pub(crate) fn redistribute(stack: &Stack<'_>, arrangement: &mut Arrangement) -> u32 {
    let Outcome::Overflow(next) = stack.arrange(arrangement.level + 1, false) else {
        return 0;
    };

    let avail = stack.frame.avail_height;
    let steps = (0..arrangement.fills.len())
        .map(Step::Fill)
        .chain((0..arrangement.primaries.len()).map(Step::Primary))
        .chain(arrangement.right.map(|_| Step::Right));

    let mut current = arrangement.clone();
    for step in steps {
        let mut trial = current.clone();
        match step {
            Step::Fill(i) => trial.fills[i] = next.fills[i],
            Step::Primary(i) => trial.primaries[i] = next.primaries[i],
            Step::Right => trial.right = next.right,
        }
        let reserved = stack.reserved_height(&trial);
        if reserved > avail {
            break;
        }
        trace!(?step, reserved, "slack step");
        trial.reserved_height = reserved;
        trial.steps += 1;
        current = trial;
    }

    // Fill zones moved ahead of the primaries stay within the narrowest one.
    let ratio = stack.frame.aspect_ratio();
    if let Some(narrowest) = current.primaries.iter().map(|p| p.dims.width).min() {
        for (slot, placed) in stack.fills.iter().zip(current.fills.iter_mut()) {
            if placed.dims.width > narrowest {
                placed.dims = ZoneDimensions::grid(narrowest, ratio, slot.count(), placed.dims.rows);
            }
        }
    }

    current.total_height = stack.measure(&current);
    *arrangement = current;
    arrangement.steps
}
