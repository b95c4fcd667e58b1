use crate::core::Viewport;
use crate::error::ChartResult;
use crate::render::{CirclePrimitive, LinePrimitive, PathPrimitive, RectPrimitive, TextPrimitive};

/// Backend-agnostic scene for one draw pass, in outer chart coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub paths: Vec<PathPrimitive>,
    pub rects: Vec<RectPrimitive>,
    pub circles: Vec<CirclePrimitive>,
    pub lines: Vec<LinePrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            paths: Vec::new(),
            rects: Vec::new(),
            circles: Vec::new(),
            lines: Vec::new(),
            texts: Vec::new(),
        }
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.viewport.validate()?;

        for path in &self.paths {
            path.validate()?;
        }
        for rect in &self.rects {
            rect.validate()?;
        }
        for circle in &self.circles {
            circle.validate()?;
        }
        for line in &self.lines {
            line.validate()?;
        }
        for text in &self.texts {
            text.validate()?;
        }

        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
            && self.rects.is_empty()
            && self.circles.is_empty()
            && self.lines.is_empty()
            && self.texts.is_empty()
    }

    fn extend(&mut self, other: &RenderFrame) {
        self.paths.extend(other.paths.iter().cloned());
        self.rects.extend(other.rects.iter().copied());
        self.circles.extend(other.circles.iter().copied());
        self.lines.extend(other.lines.iter().copied());
        self.texts.extend(other.texts.iter().cloned());
    }
}

/// Drawing order of the chart, back to front.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartLayer {
    Histograms,
    Points,
    Axes,
    Legend,
    Overlay,
}

impl ChartLayer {
    pub const ORDER: [ChartLayer; 5] = [
        ChartLayer::Histograms,
        ChartLayer::Points,
        ChartLayer::Axes,
        ChartLayer::Legend,
        ChartLayer::Overlay,
    ];
}

/// One `RenderFrame` per layer, flattened back to front on demand.
#[derive(Debug, Clone, PartialEq)]
pub struct LayeredRenderFrame {
    pub viewport: Viewport,
    layers: Vec<(ChartLayer, RenderFrame)>,
}

impl LayeredRenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            layers: ChartLayer::ORDER
                .into_iter()
                .map(|kind| (kind, RenderFrame::new(viewport)))
                .collect(),
        }
    }

    #[must_use]
    pub fn layer(&self, kind: ChartLayer) -> Option<&RenderFrame> {
        self.layers
            .iter()
            .find(|(layer, _)| *layer == kind)
            .map(|(_, frame)| frame)
    }

    pub fn layer_mut(&mut self, kind: ChartLayer) -> &mut RenderFrame {
        let position = ChartLayer::ORDER
            .iter()
            .position(|layer| *layer == kind)
            .unwrap_or(0);
        &mut self.layers[position].1
    }

    #[must_use]
    pub fn flatten(&self) -> RenderFrame {
        self.flatten_layers(&ChartLayer::ORDER)
    }

    #[must_use]
    pub fn flatten_layers(&self, include_layers: &[ChartLayer]) -> RenderFrame {
        let mut frame = RenderFrame::new(self.viewport);
        for (kind, layer) in &self.layers {
            if include_layers.contains(kind) {
                frame.extend(layer);
            }
        }
        frame
    }
}
