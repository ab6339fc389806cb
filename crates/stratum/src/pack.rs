//! Packing of independently laid out components.
//!
//! Components are stacked along the secondary axis (X for vertical layouts, Y for horizontal
//! ones) in the order they are given, `component_sep` apart. Along the rank axis every component
//! starts at the same edge: the top/left for TB/LR, the bottom/right for BT/RL, so rank 0 lines
//! up across components. Nodes of neighbouring components can therefore share a row, and the gap
//! between components never drops below `node_sep`.

use crate::config::LayoutOptions;
use crate::diagram::Point;
use crate::pipeline::ComponentLayout;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Packed {
    /// Center of every caller node, by caller index.
    pub centers: Vec<Option<Point>>,
    /// `(caller edge index, polyline)`, sorted by edge index.
    pub routes: Vec<(usize, Vec<Point>)>,
}

#[derive(Debug, Clone, Copy)]
struct Bounds {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl Bounds {
    fn empty() -> Self {
        Self {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }

    fn include(&mut self, x0: f64, y0: f64, x1: f64, y1: f64) {
        self.min_x = self.min_x.min(x0);
        self.min_y = self.min_y.min(y0);
        self.max_x = self.max_x.max(x1);
        self.max_y = self.max_y.max(y1);
    }

    fn of(layout: &ComponentLayout) -> Self {
        let mut b = Self::empty();
        for (_, r) in &layout.nodes {
            b.include(
                r.x - r.width / 2.0,
                r.y - r.height / 2.0,
                r.x + r.width / 2.0,
                r.y + r.height / 2.0,
            );
        }
        for p in layout.routes.iter().flat_map(|(_, pts)| pts) {
            b.include(p.x, p.y, p.x, p.y);
        }
        b
    }
}

pub fn pack(layouts: &[ComponentLayout], node_count: usize, options: &LayoutOptions) -> Packed {
    let horizontal = options.direction.is_horizontal();
    let reversed = options.direction.is_reversed();

    // (primary, secondary) axis views of a bounding box.
    let split = |b: &Bounds| {
        if horizontal {
            ((b.min_x, b.max_x), (b.min_y, b.max_y))
        } else {
            ((b.min_y, b.max_y), (b.min_x, b.max_x))
        }
    };
    let (primary_margin, secondary_margin) = if horizontal {
        (options.margin_x, options.margin_y)
    } else {
        (options.margin_y, options.margin_x)
    };

    let bounds: Vec<Option<Bounds>> = layouts
        .iter()
        .map(|l| (!l.nodes.is_empty()).then(|| Bounds::of(l)))
        .collect();
    let primary_extent = bounds
        .iter()
        .flatten()
        .map(|b| {
            let ((lo, hi), _) = split(b);
            hi - lo
        })
        .fold(0.0, f64::max);

    let mut packed = Packed {
        centers: vec![None; node_count],
        routes: Vec::new(),
    };
    let gap = options.component_sep.max(options.node_sep);
    let mut cursor = secondary_margin;

    for (layout, b) in layouts.iter().zip(&bounds) {
        let Some(b) = b else {
            continue;
        };
        let ((p_lo, p_hi), (s_lo, s_hi)) = split(b);
        let dp = if reversed {
            primary_margin + primary_extent - p_hi
        } else {
            primary_margin - p_lo
        };
        let ds = cursor - s_lo;
        cursor += (s_hi - s_lo) + gap;

        let (dx, dy) = if horizontal { (dp, ds) } else { (ds, dp) };
        let shift = |p: Point| Point::new(p.x + dx, p.y + dy);

        for (n, r) in &layout.nodes {
            if let Some(slot) = packed.centers.get_mut(*n) {
                *slot = Some(shift(r.center()));
            }
        }
        for (e, pts) in &layout.routes {
            packed
                .routes
                .push((*e, pts.iter().copied().map(shift).collect()));
        }
    }

    packed.routes.sort_by_key(|(e, _)| *e);
    packed
}
