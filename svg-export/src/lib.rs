#![warn(clippy::all, rust_2018_idioms)]

mod svg;

pub use svg::{
    opts, render, Circle, Group, Line, Params, Polygon, Polyline, Rect, RenderTag, Tag, Text,
    SVG,
};
