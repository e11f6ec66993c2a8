use std::time::Duration;

use egui::Pos2;

use crate::config::ClickThresholds;
use crate::graph::NodeId;

/// Where and when the pointer went down on a node
#[derive(Clone, Debug, PartialEq)]
pub struct PointerPress {
    pub node: NodeId,
    pub origin: Pos2,
    pub node_origin: Pos2,
    pub at: Duration,
}

impl PointerPress {
    fn node_pos_for(&self, pointer: Pos2) -> Pos2 {
        self.node_origin + (pointer - self.origin)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum PointerState {
    #[default]
    Idle,
    Pressed(PointerPress),
    Dragging(PointerPress),
}

#[derive(Clone, Debug, PartialEq)]
pub enum InteractionEvent {
    NodeClicked(NodeId),
    NodeMoved { id: NodeId, x: f32, y: f32 },
}

/// Live position of the node being dragged
#[derive(Clone, Debug, PartialEq)]
pub struct DragUpdate {
    pub node: NodeId,
    pub pos: Pos2,
}

/// Turns pointer down/move/up on nodes into drags and clicks.
///
/// A press released within `max_distance` of where it started and before `max_elapsed` is a click,
/// everything else ends as a move. Once the pointer leaves the distance threshold the press is a
/// drag and can no longer become a click.
#[derive(Clone, Debug)]
pub struct NodeInteraction {
    thresholds: ClickThresholds,
    state: PointerState,
}

impl NodeInteraction {
    pub fn new(thresholds: ClickThresholds) -> Self {
        Self {
            thresholds,
            state: PointerState::Idle,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> &PointerState {
        &self.state
    }

    pub fn dragged_node(&self) -> Option<&str> {
        match &self.state {
            PointerState::Dragging(press) => Some(&press.node),
            _ => None,
        }
    }

    /// `pointer` is in screen coordinates, `node_pos` in graph coordinates.
    pub fn pointer_down(&mut self, node: NodeId, pointer: Pos2, node_pos: Pos2, now: Duration) {
        self.state = PointerState::Pressed(PointerPress {
            node,
            origin: pointer,
            node_origin: node_pos,
            at: now,
        });
    }

    pub fn pointer_move(&mut self, pointer: Pos2) -> Option<DragUpdate> {
        let press = match std::mem::take(&mut self.state) {
            PointerState::Pressed(press)
                if pointer.distance(press.origin) >= self.thresholds.max_distance =>
            {
                press
            }
            PointerState::Dragging(press) => press,
            other => {
                self.state = other;
                return None;
            }
        };

        let update = DragUpdate {
            node: press.node.clone(),
            pos: press.node_pos_for(pointer),
        };
        self.state = PointerState::Dragging(press);
        Some(update)
    }

    pub fn pointer_up(&mut self, pointer: Pos2, now: Duration) -> Option<InteractionEvent> {
        let (press, dragged) = match std::mem::take(&mut self.state) {
            PointerState::Idle => return None,
            PointerState::Pressed(press) => (press, false),
            PointerState::Dragging(press) => (press, true),
        };

        let distance = pointer.distance(press.origin);
        let elapsed = now.saturating_sub(press.at);
        let within_distance = distance < self.thresholds.max_distance;

        if !dragged && within_distance && elapsed < self.thresholds.max_elapsed {
            return Some(InteractionEvent::NodeClicked(press.node));
        }

        // a slow press that never moved keeps the node where it was
        let pos = if dragged || !within_distance {
            press.node_pos_for(pointer)
        } else {
            press.node_origin
        };
        Some(InteractionEvent::NodeMoved {
            id: press.node,
            x: pos.x,
            y: pos.y,
        })
    }

    /// Release reported without a pointer position, e.g. the pointer left the window. A pending
    /// press is dropped and a drag ends where the last move put it.
    pub fn pointer_released(
        &mut self,
        pointer: Option<Pos2>,
        now: Duration,
    ) -> Option<InteractionEvent> {
        match pointer {
            Some(pointer) => self.pointer_up(pointer, now),
            None => {
                self.cancel();
                None
            }
        }
    }

    pub fn cancel(&mut self) {
        self.state = PointerState::Idle;
    }
}
