mod frame;
mod null_renderer;
mod primitives;

pub use frame::{ChartLayer, LayeredRenderFrame, RenderFrame};
pub use null_renderer::NullRenderer;
pub use primitives::{
    CirclePrimitive, Color, LinePrimitive, PathPrimitive, RectPrimitive, TextHAlign,
    TextPrimitive,
};

use crate::error::ChartResult;

/// Contract implemented by any drawing backend.
///
/// Backends receive fully materialized frames, so drawing code never sees
/// scales, partitions or pointer state.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}
