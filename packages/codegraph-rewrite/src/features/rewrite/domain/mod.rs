mod rewrite_plan;

pub use rewrite_plan::RewritePlan;
