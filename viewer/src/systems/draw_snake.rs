use crate::canvas::DebugLinesCanvas;
use amethyst::{derive::SystemDesc, ecs::prelude::*, renderer::debug_drawing::DebugLines};
use slither_core::{chain::Chain, color::DARK_GREY};

#[derive(SystemDesc)]
pub struct DrawSnakeSystem;

impl<'s> System<'s> for DrawSnakeSystem {
    type SystemData = (WriteExpect<'s, Chain>, WriteExpect<'s, DebugLines>);

    fn run(&mut self, (mut chain, mut lines): Self::SystemData) {
        chain.render(&mut DebugLinesCanvas::new(&mut lines, DARK_GREY));
    }
}
