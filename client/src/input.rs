use bevy::prelude::*;
use leafwing_input_manager::prelude::*;
use sim::DirectionSource;

#[derive(Actionlike, Reflect, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputAction {
    #[actionlike(DualAxis)]
    Move,
    #[actionlike(DualAxis)]
    Pan,
    /// Held while dragging the camera.
    Drag,
}

pub(super) fn plugin(app: &mut App) {
    app.add_plugins(InputManagerPlugin::<InputAction>::default());

    app.register_type::<InputAction>();

    let input_map = InputMap::<InputAction>::default()
        .with_dual_axis(InputAction::Move, VirtualDPad::arrow_keys())
        .with_dual_axis(InputAction::Move, VirtualDPad::wasd())
        .with_dual_axis(InputAction::Pan, MouseMove::default())
        .with(InputAction::Drag, MouseButton::Left);
    app.insert_resource(input_map);
    app.insert_resource(ActionState::<InputAction>::default());
}

/// Keyboard state seen as the simulation's direction source.
///
/// The D-pad reports "up" as +Y; the simulation expects it toward -Y (away from the viewer).
pub struct ActionDirection<'a>(pub &'a ActionState<InputAction>);

impl DirectionSource for ActionDirection<'_> {
    fn current_raw_direction(&self) -> sim::Vec2 {
        let axis = self.0.axis_pair(&InputAction::Move);
        sim::Vec2::new(axis.x, -axis.y)
    }
}
