pub mod color;
pub mod compass;
pub mod config;
pub mod disc;
pub mod edges;
pub mod geom;
pub mod markers;
pub mod mesh;
pub mod model;
pub mod orient;
pub mod report;
pub mod scene;
pub mod trajectory;
