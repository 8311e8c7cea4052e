use amethyst::{
    derive::SystemDesc,
    ecs::prelude::*,
    input::{InputHandler, StringBindings},
    window::ScreenDimensions,
};
use slither_core::{chain::Chain, vector::Vector2};

/// Last pointer position seen inside the window, in world units.
#[derive(Debug, Default, Clone, Copy, From)]
pub struct PointerSample(pub Option<Vector2>);

/// Moves the chain one frame toward the sampled pointer.
#[derive(SystemDesc)]
pub struct FollowPointerSystem;

impl<'s> System<'s> for FollowPointerSystem {
    type SystemData = (
        Read<'s, InputHandler<StringBindings>>,
        ReadExpect<'s, ScreenDimensions>,
        Write<'s, PointerSample>,
        WriteExpect<'s, Chain>,
    );

    fn run(&mut self, (input, screen, mut sample, mut chain): Self::SystemData) {
        if let Some(position) = input.mouse_position() {
            *sample = Some(to_world(
                position,
                screen.height(),
                screen.hidpi_factor() as f32,
            ))
            .into();
        }
        // Until the pointer enters the window the head holds still and the body settles.
        let pointer = sample.0.unwrap_or_else(|| chain.head().position());
        chain.update(pointer);
    }
}

/// Converts a physical window position (y down) to logical world units (y up).
pub fn to_world((x, y): (f32, f32), physical_height: f32, hidpi_factor: f32) -> Vector2 {
    Vector2::new(x / hidpi_factor, (physical_height - y) / hidpi_factor)
}

#[test]
fn test_to_world() {
    assert_eq!(to_world((0.0, 600.0), 600.0, 1.0), Vector2::new(0.0, 0.0));
    assert_eq!(to_world((100.0, 50.0), 600.0, 1.0), Vector2::new(100.0, 550.0));
}

#[test]
fn test_to_world_hidpi() {
    assert_eq!(
        to_world((200.0, 100.0), 1200.0, 2.0),
        Vector2::new(100.0, 550.0)
    );
}
