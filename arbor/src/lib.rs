pub mod animation;
pub mod config;
pub mod data;
pub mod error;
pub mod geometry;
pub mod identity;
pub mod layout;
pub mod node;
pub mod renderer;
pub mod scene;
pub mod transitions;
pub mod tree;
pub mod types;

pub use animation::{Clock, Interpolate, ManualClock, SystemClock, Tween};
pub use config::{RendererConfig, Surface};
pub use data::TreeNode;
pub use error::{Error, Result};
pub use geometry::{Diagonal, Point};
pub use identity::{IdAllocator, NodeId};
pub use layout::{layout, LayoutResult, LayoutSize};
pub use node::{Children, NodeState, RenderNode};
pub use renderer::{Activation, TreeRenderer};
pub use scene::{Frame, HintFrame, LabelAnchor, LinkFrame, NodeFrame, PassSummary, Scene, SourceMotion};
pub use transitions::{Easing, TransitionConfig};
pub use tree::RenderTree;
pub use types::*;
