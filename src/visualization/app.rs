use std::collections::HashMap;
use std::time::Duration;

use eframe::{App, CreationContext};
use egui::{Align2, Color32, Context, FontId, Pos2, Sense, Ui};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{Settings, MAX_NODES, MIN_NODES};
use crate::contraction::run_trace;
use crate::graph::{generate_layout, random_edges, Graph, NodeId};
use crate::visualization::curves::EdgeCurves;
use crate::visualization::edge::{EdgeRole, EdgeShape};
use crate::visualization::gesture::{EdgeGesture, GestureOutcome};
use crate::visualization::interaction::{InteractionEvent, NodeInteraction};
use crate::visualization::node::{NodeKind, NodeShape};
use crate::visualization::player::{PlayerState, TracePlayer};

const BACKGROUND: Color32 = Color32::from_rgb(0x02, 0x06, 0x17);
const HINT: Color32 = Color32::from_rgb(0x9C, 0xA3, 0xAF);

pub(crate) struct ContractionApp {
    settings: Settings,
    rng: StdRng,

    // the snapshot on screen, drags and hand-drawn edges change only this copy
    graph: Graph,
    positions: HashMap<NodeId, Pos2>,
    curves: EdgeCurves,

    player: TracePlayer,
    interaction: NodeInteraction,
    gesture: EdgeGesture,
    step_entered_at: Duration,
    status: Option<String>,
}

impl ContractionApp {
    pub(crate) fn new(settings: Settings, _: &CreationContext<'_>) -> Self {
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let graph = Graph::from_nodes(generate_layout(settings.node_count, &settings.layout));

        let mut app = Self {
            rng,
            positions: HashMap::new(),
            curves: EdgeCurves::default(),
            player: TracePlayer::new(settings.autoplay_delay),
            interaction: NodeInteraction::new(settings.click),
            gesture: EdgeGesture::default(),
            step_entered_at: Duration::ZERO,
            status: None,
            graph,
            settings,
        };
        app.relayout();
        app
    }

    /// Full curve layout for the displayed graph
    fn relayout(&mut self) {
        self.positions = self.graph.positions();
        self.curves = EdgeCurves::new(&self.graph, &self.positions, self.settings.curve_offset);
    }

    fn show(&mut self, graph: Graph, now: Duration) {
        self.graph = graph;
        self.interaction.cancel();
        if self.gesture.forget_missing(&self.graph) {
            debug!("pending edge source is not part of this step, gesture dropped");
        }
        self.step_entered_at = now;
        self.relayout();
    }

    fn show_current_step(&mut self, now: Duration) {
        if let Some(step) = self.player.current_step() {
            let graph = step.graph.clone();
            self.show(graph, now);
        }
    }

    fn new_graph(&mut self, now: Duration) {
        let nodes = generate_layout(self.settings.node_count, &self.settings.layout);
        self.player.clear();
        self.gesture.reset();
        self.status = None;
        self.show(Graph::from_nodes(nodes), now);
        info!("generated {} nodes", self.graph.node_count());
    }

    fn randomize_edges(&mut self, now: Duration) {
        match random_edges(
            &self.graph.nodes,
            self.settings.edge_probability,
            &mut self.rng,
        ) {
            Ok(edges) => {
                let graph = Graph {
                    nodes: self.graph.nodes.clone(),
                    edges,
                };
                info!(
                    "generated {} random edges with p = {:.2}",
                    graph.edge_count(),
                    self.settings.edge_probability
                );
                self.player.clear();
                self.gesture.reset();
                self.status = None;
                self.show(graph, now);
            }
            Err(err) => {
                warn!("{}", err);
                self.status = Some(err.to_string());
            }
        }
    }

    fn run(&mut self, now: Duration) {
        if let Err(err) = self.graph.validate() {
            warn!("refusing to contract an invalid graph: {}", err);
            self.status = Some(err.to_string());
            return;
        }

        let rng = &mut self.rng;
        let trace = run_trace(&self.graph, || rng.gen::<f64>());
        debug!("run ended with {:?}", trace.termination());
        self.status = Some(format!(
            "{} after {} merges",
            trace.final_step().description,
            trace.merge_count()
        ));
        self.gesture.reset();
        self.player.load(trace, now);
        self.show_current_step(now);
    }

    fn on_node_clicked(&mut self, id: NodeId) {
        match self.gesture.click(id) {
            GestureOutcome::Started(source) => debug!("edge source picked: {}", source),
            GestureOutcome::Cancelled(source) => debug!("edge from {} cancelled", source),
            GestureOutcome::Connect { source, target } => {
                match self.graph.add_edge(&source, &target) {
                    Ok(edge) => {
                        info!("added edge {} between {} and {}", edge, source, target);
                        self.relayout();
                    }
                    Err(err) => {
                        warn!("cannot add edge: {}", err);
                        self.status = Some(err.to_string());
                    }
                }
            }
        }
    }

    fn on_node_moved(&mut self, id: NodeId, pos: Pos2) {
        if self.graph.move_node(&id, pos.x, pos.y) {
            self.positions.insert(id.clone(), pos);
            self.curves.update_node(&id, &self.positions);
            debug!("node {} moved to ({:.1}, {:.1})", id, pos.x, pos.y);
        }
    }

    fn node_at(&self, pos: Pos2) -> Option<NodeId> {
        // topmost first, nodes are painted in list order
        self.graph
            .nodes
            .iter()
            .rev()
            .find(|node| {
                NodeShape::new(node, self.settings.node_radius, self.settings.label_max_chars)
                    .is_inside(pos)
            })
            .map(|node| node.id.clone())
    }

    fn merge_progress(&self, now: Duration) -> f32 {
        let elapsed = now.saturating_sub(self.step_entered_at).as_secs_f32();
        (elapsed / self.settings.merge_animation.as_secs_f32()).clamp(0., 1.)
    }

    fn controls(&mut self, ui: &mut Ui, now: Duration) {
        ui.horizontal_wrapped(|ui| {
            ui.add(
                egui::Slider::new(&mut self.settings.node_count, MIN_NODES..=MAX_NODES)
                    .text("Nodes"),
            );
            ui.add(
                egui::Slider::new(&mut self.settings.edge_probability, 0.0..=1.0)
                    .step_by(0.05)
                    .text("Edge probability"),
            );
            if ui.button("New graph").clicked() {
                self.new_graph(now);
            }
            if ui.button("Random edges").clicked() {
                self.randomize_edges(now);
            }
            if ui.button("Run contraction").clicked() {
                self.run(now);
            }
            if ui.button("Previous").clicked() && self.player.previous() {
                self.show_current_step(now);
            }
            if ui.button("Next step").clicked() && self.player.next(now) {
                self.show_current_step(now);
            }
            if let (Some(last), Some(mut index)) = (
                self.player.trace().map(|trace| trace.last_index()),
                self.player.step_index(),
            ) {
                let slider = ui.add(egui::Slider::new(&mut index, 0..=last).text("Step"));
                if slider.changed() && self.player.seek(index) {
                    self.show_current_step(now);
                }
            }
            let mut autoplay = self.player.autoplay();
            if ui.checkbox(&mut autoplay, "Autoplay").changed() {
                self.player.set_autoplay(autoplay, now);
            }
        });
    }

    fn status_line(&self, ui: &mut Ui) {
        ui.horizontal_wrapped(|ui| {
            if let (Some(trace), Some(index)) = (self.player.trace(), self.player.step_index()) {
                ui.label(format!("Step {}/{}", index + 1, trace.len()));
                ui.label(&trace.current_step(index).description);
                if let PlayerState::Playing { .. } = self.player.state() {
                    ui.label("(advancing)");
                }
            }
            ui.label(format!(
                "{} nodes, {} edges, {} components",
                self.graph.node_count(),
                self.graph.edge_count(),
                self.graph.component_count()
            ));
            if let Some(source) = self.gesture.pending() {
                ui.label(format!("New edge from {}: click a second node", source));
            }
            if let Some(status) = &self.status {
                ui.label(status);
            }
        });
    }

    fn handle_pointer(&mut self, ui: &Ui, response: &egui::Response, origin: Pos2, now: Duration) {
        let (pointer, pressed, released) = ui.input(|input| {
            (
                input.pointer.interact_pos(),
                input.pointer.primary_pressed(),
                input.pointer.primary_released(),
            )
        });
        let Some(pointer) = pointer else {
            if released {
                // a drag must not outlive its button release
                self.release(None, now);
            }
            return;
        };

        if pressed && response.hovered() {
            if let Some(id) = self.node_at(pointer - origin.to_vec2()) {
                let node_pos = self.positions.get(&id).copied().unwrap_or(pointer);
                self.interaction.pointer_down(id, pointer, node_pos, now);
            }
        }

        if let Some(update) = self.interaction.pointer_move(pointer) {
            // live update, only the curves around the dragged node are recomputed
            self.graph.move_node(&update.node, update.pos.x, update.pos.y);
            self.positions.insert(update.node.clone(), update.pos);
            self.curves.update_node(&update.node, &self.positions);
        }

        if released {
            self.release(Some(pointer), now);
        }
    }

    fn release(&mut self, pointer: Option<Pos2>, now: Duration) {
        match self.interaction.pointer_released(pointer, now) {
            Some(InteractionEvent::NodeClicked(id)) => self.on_node_clicked(id),
            Some(InteractionEvent::NodeMoved { id, x, y }) => self.on_node_moved(id, Pos2::new(x, y)),
            None => {}
        }
    }

    fn canvas(&mut self, ui: &mut Ui, now: Duration) {
        let (response, painter) =
            ui.allocate_painter(self.settings.canvas_size, Sense::click_and_drag());
        let rect = response.rect;
        let origin = rect.min;
        painter.rect_filled(rect, 12., BACKGROUND);

        if self.graph.is_empty() {
            painter.text(
                rect.center(),
                Align2::CENTER_CENTER,
                "No graph - generate one above",
                FontId::proportional(16.),
                HINT,
            );
            return;
        }

        self.handle_pointer(ui, &response, origin, now);

        let step = self.player.current_step();
        let selected = step.and_then(|step| step.selected_edge_id.as_deref());
        let cut = match self.player.is_at_end() {
            true => self.player.trace().and_then(|trace| trace.cut()),
            false => None,
        };

        for curved in self.curves.curves() {
            let Some(curve) = curved.curve else {
                continue;
            };
            let role = if selected == Some(curved.edge.id.as_str()) {
                EdgeRole::Selected
            } else if cut.is_some_and(|cut| cut.contains_edge(&curved.edge.id)) {
                EdgeRole::Cut
            } else {
                EdgeRole::Other
            };
            painter.add(EdgeShape::new(curve, role).shape(origin));
        }

        let merge_pair = step.and_then(|step| step.merge_pair.as_ref());
        let merge_target = merge_pair.and_then(|pair| {
            let u = self.positions.get(&pair.u)?;
            let v = self.positions.get(&pair.v)?;
            Some(u.lerp(*v, 0.5))
        });
        let progress = self.merge_progress(now);
        let dragged = self.interaction.dragged_node();
        let pending = self.gesture.pending();

        for node in &self.graph.nodes {
            let mut shape =
                NodeShape::new(node, self.settings.node_radius, self.settings.label_max_chars)
                    .with_dragged(dragged == Some(node.id.as_str()));

            if let (Some(pair), Some(target)) = (merge_pair, merge_target) {
                if pair.contains(&node.id) {
                    shape = shape
                        .with_kind(NodeKind::Merging)
                        .collapse_toward(target, progress);
                }
            }
            if pending == Some(node.id.as_str()) {
                shape = shape.with_kind(NodeKind::PendingSource);
            }

            for s in shape.shapes(ui.ctx(), origin) {
                painter.add(s);
            }
        }

        if merge_target.is_some() && progress < 1. {
            ui.ctx().request_repaint();
        }
    }
}

impl App for ContractionApp {
    fn update(&mut self, ctx: &Context, _: &mut eframe::Frame) {
        let now = Duration::from_secs_f64(ctx.input(|input| input.time));

        if self.player.tick(now) {
            self.show_current_step(now);
        }

        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.add_space(4.);
            self.controls(ui, now);
            self.status_line(ui);
            ui.add_space(4.);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.canvas(ui, now);
        });

        if let Some(deadline) = self.player.deadline() {
            ctx.request_repaint_after(deadline.saturating_sub(now));
        }
    }
}
