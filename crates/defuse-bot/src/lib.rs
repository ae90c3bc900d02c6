pub mod bot;
pub mod policy;

pub use bot::{
    BotContext, BotParams, ContextError, PickDecision, PickPlanner, PlayDecision, PlayPlanner,
    Strategy,
};
pub use policy::{Agent, HeuristicPolicy, HumanPolicy, Policy, PolicyContext};
