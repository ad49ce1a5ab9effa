use blockspace_author::Editor;
use blockspace_common::{BlockType, EditorConfig};
use blockspace_input::{Action, InputState, ModeKind};
use blockspace_kernel::{VoxelWorld, WorldEvent};
use blockspace_motion::{CameraRig, ControlMode};
use blockspace_render::{CubePicker, Scene};
use blockspace_render_wgpu::Projection;
use blockspace_tools::{WorldInspector, WorldSummary};
use egui::Context as EguiContext;

/// What the window layer should do with the pointer after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerRequest {
    Keep,
    Capture,
    Release,
}

/// Application state, independent of the window and GPU.
pub struct AppState {
    pub world: VoxelWorld,
    pub scene: Scene,
    pub editor: Editor,
    pub rig: CameraRig,
    pub input: InputState,
    pub projection: Projection,
    /// Left button held in orbit mode.
    orbit_dragging: bool,
    show_inspector: bool,
    /// Most recent world event drained from the log.
    last_event: Option<WorldEvent>,
    /// World events drained since startup, generation included.
    events_seen: u64,
    /// Summary and the scene revision it was built at.
    summary: Option<(u64, WorldSummary)>,
    frames: u64,
}

impl AppState {
    pub fn new(config: &EditorConfig) -> Self {
        let mut world = VoxelWorld::new();
        let mut scene = Scene::new();
        blockspace_terrain::populate(&config.terrain, &mut world, &mut scene);

        let mut state = Self {
            world,
            scene,
            editor: Editor::new(),
            rig: CameraRig::new(config.motion, config.view),
            input: InputState::new(),
            projection: Projection::new(config.view.fov_degrees),
            orbit_dragging: false,
            show_inspector: true,
            last_event: None,
            events_seen: 0,
            summary: None,
            frames: 0,
        };
        state.drain_world_events();
        state
    }

    /// Advance the active control mode by one tick and consume the world
    /// events since the last frame. Called once per rendered frame, before
    /// drawing; motion constants are per tick.
    pub fn update(&mut self) {
        self.rig.tick(&self.world, &self.input);
        self.drain_world_events();
        self.frames += 1;
    }

    /// Empty the world's event log into the readout. Returns how many events
    /// were drained.
    fn drain_world_events(&mut self) -> usize {
        let events = self.world.drain_events();
        self.events_seen += events.len() as u64;
        if let Some(last) = events.last() {
            self.last_event = Some(last.clone());
        }
        events.len()
    }

    /// World summary, rebuilt only when the scene has changed.
    fn summary(&mut self) -> &WorldSummary {
        let revision = self.scene.revision();
        let cached = self.summary.take().filter(|(r, _)| *r == revision);
        let (_, summary) = self
            .summary
            .insert(cached.unwrap_or_else(|| (revision, WorldInspector::summary(&self.world))));
        summary
    }

    /// Apply one input action. Returns what should happen to the OS pointer.
    pub fn handle_action(&mut self, action: Action) -> PointerRequest {
        match action {
            Action::ToggleMode => self.toggle_mode(),
            Action::ReleaseCapture => {
                if self.input.interaction().cursor_captured {
                    self.input.set_captured(false);
                    tracing::debug!("pointer capture released");
                    return PointerRequest::Release;
                }
                PointerRequest::Keep
            }
            Action::Jump => {
                self.rig.jump(&self.input);
                PointerRequest::Keep
            }
            Action::Move { direction, pressed } => {
                self.input.set_move(direction, pressed);
                PointerRequest::Keep
            }
            Action::Look { dx, dy } => {
                let orbiting = self.rig.kind() == ModeKind::Orbit;
                if !orbiting || self.orbit_dragging {
                    self.rig.look(dx, dy, &self.input);
                }
                PointerRequest::Keep
            }
            Action::Zoom(steps) => {
                self.rig.zoom(steps);
                PointerRequest::Keep
            }
            Action::Primary | Action::Secondary => self.pointer_press(action),
            Action::SelectBlock(_) => {
                self.apply_edit(action);
                PointerRequest::Keep
            }
            Action::Noop => PointerRequest::Keep,
        }
    }

    /// A button release. Only ends an orbit drag.
    pub fn pointer_release(&mut self, action: Action) {
        if action == Action::Primary {
            self.orbit_dragging = false;
        }
    }

    /// The window reported the outcome of a capture request.
    pub fn set_captured(&mut self, captured: bool) {
        self.input.set_captured(captured);
    }

    fn toggle_mode(&mut self) -> PointerRequest {
        self.orbit_dragging = false;
        match self.rig.toggle_mode(&mut self.input) {
            ModeKind::Walk => PointerRequest::Capture,
            ModeKind::Orbit => PointerRequest::Release,
        }
    }

    fn pointer_press(&mut self, action: Action) -> PointerRequest {
        match self.rig.kind() {
            ModeKind::Orbit => {
                if action == Action::Primary {
                    self.orbit_dragging = true;
                }
                PointerRequest::Keep
            }
            // a click into an uncaptured walk view re-captures instead of editing
            ModeKind::Walk if !self.input.interaction().cursor_captured => {
                PointerRequest::Capture
            }
            ModeKind::Walk => {
                self.apply_edit(action);
                PointerRequest::Keep
            }
        }
    }

    fn apply_edit(&mut self, action: Action) {
        let ray = self.rig.pose().view_ray();
        self.editor.apply(
            action,
            self.input.interaction(),
            &ray,
            &mut self.world,
            &mut self.scene,
            &CubePicker,
        );
    }

    /// Release every drawable before shutdown.
    pub fn shutdown(&mut self) {
        self.world.release_all(&mut self.scene);
        let released = self.drain_world_events();
        tracing::info!(
            released,
            events = self.events_seen,
            stale_removals = self.scene.stats().stale_removals,
            "world released"
        );
    }

    pub fn draw_ui(&mut self, ctx: &EguiContext) -> PointerRequest {
        let mut request = PointerRequest::Keep;
        let walking = self.rig.kind() == ModeKind::Walk;

        if self.show_inspector {
            request = self.draw_side_panel(ctx, walking);
        }
        self.draw_block_info(ctx, walking);
        if walking {
            draw_crosshair(ctx);
        }
        request
    }

    fn draw_side_panel(&mut self, ctx: &EguiContext, walking: bool) -> PointerRequest {
        let mut request = PointerRequest::Keep;
        let summary = self.summary().clone();

        egui::SidePanel::left("inspector")
            .default_width(260.0)
            .show(ctx, |ui| {
                ui.heading("Blockspace");
                ui.separator();

                let label = if walking {
                    "Switch to Orbit (Tab)"
                } else {
                    "Switch to Walk (Tab)"
                };
                if ui.button(label).clicked() {
                    request = self.toggle_mode();
                }
                let pose = self.rig.pose();
                ui.label(format!(
                    "Camera: ({:.1}, {:.1}, {:.1})",
                    pose.position.x, pose.position.y, pose.position.z
                ));
                if let ControlMode::Walk(walk) = self.rig.mode() {
                    ui.label(format!(
                        "Grounded: {}  vy: {:.3}",
                        walk.grounded(),
                        walk.vertical_velocity()
                    ));
                    if !self.input.interaction().cursor_captured {
                        ui.colored_label(egui::Color32::YELLOW, "Click the view to capture");
                    }
                }
                ui.separator();

                ui.heading("Blocks");
                for block in BlockType::PLACEABLE {
                    let selected = self.editor.current_block() == block;
                    let text = format!("{} {}", block.id(), block.name());
                    if ui.selectable_label(selected, text).clicked() {
                        self.editor.select(block.id());
                    }
                }
                ui.separator();

                ui.heading("World");
                ui.label(format!("Voxels: {}", summary.voxel_count));
                for (block, n) in &summary.per_block {
                    ui.label(format!("  {block}: {n}"));
                }
                if let Some(b) = summary.bounds {
                    ui.label(format!("Bounds: {} .. {}", b.min, b.max));
                }
                ui.label(format!("Events: {}", self.events_seen));
                ui.label(format!("Drawables: {}", self.scene.len()));
                ui.label(format!("Frames: {}", self.frames));
                if let Some(event) = &self.last_event {
                    ui.label(describe_event(event));
                }

                ui.separator();
                ui.small("F1: panel | Tab: mode | WASD/Space: move | LMB/RMB: remove/place | 1-5: block | Esc: release");
            });
        request
    }

    fn draw_block_info(&self, ctx: &EguiContext, walking: bool) {
        let fill = if walking {
            egui::Color32::from_rgba_unmultiplied(0, 50, 0, 204)
        } else {
            egui::Color32::from_rgba_unmultiplied(0, 0, 0, 178)
        };
        egui::Area::new(egui::Id::new("block_info"))
            .anchor(egui::Align2::RIGHT_TOP, [-10.0, 10.0])
            .show(ctx, |ui| {
                egui::Frame::default()
                    .fill(fill)
                    .inner_margin(egui::Margin::same(8))
                    .show(ui, |ui| {
                        ui.colored_label(
                            egui::Color32::WHITE,
                            format!("Block: {}", self.editor.readout()),
                        );
                    });
            });
    }

    pub fn toggle_inspector(&mut self) {
        self.show_inspector = !self.show_inspector;
    }
}

fn describe_event(event: &WorldEvent) -> String {
    match event {
        WorldEvent::Placed {
            coord,
            block,
            replaced: Some(old),
        } => format!("Placed {block} at {coord} over {old}"),
        WorldEvent::Placed { coord, block, .. } => format!("Placed {block} at {coord}"),
        WorldEvent::Removed { coord, block } => format!("Removed {block} at {coord}"),
    }
}

fn draw_crosshair(ctx: &EguiContext) {
    let painter = ctx.layer_painter(egui::LayerId::new(
        egui::Order::Foreground,
        egui::Id::new("crosshair"),
    ));
    let c = ctx.screen_rect().center();
    let stroke = egui::Stroke::new(2.0, egui::Color32::WHITE);
    let arm = 10.0;
    painter.line_segment([c - egui::vec2(arm, 0.0), c + egui::vec2(arm, 0.0)], stroke);
    painter.line_segment([c - egui::vec2(0.0, arm), c + egui::vec2(0.0, arm)], stroke);
}
