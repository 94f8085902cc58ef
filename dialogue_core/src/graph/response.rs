//! Responses and the transitions they resolve to.

use dialogue_rules::{all_hold, Condition, Effect, ExpressionError, Globals};
use tracing::debug;

use super::PromptId;

/// A conditional edge to another prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    target: PromptId,
    conditions: Vec<Condition>,
}

impl Transition {
    /// Create an unconditional transition.
    pub fn new(target: PromptId) -> Self {
        Self {
            target,
            conditions: Vec::new(),
        }
    }

    /// Add a condition to this transition.
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    pub fn target(&self) -> PromptId {
        self.target
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Check whether every condition holds. An empty set always holds.
    pub fn is_satisfied(&self, globals: &Globals) -> bool {
        all_hold(&self.conditions, globals)
    }
}

/// One selectable choice: gating preconditions, effects, and ordered transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    text: String,
    preconditions: Vec<Condition>,
    effects: Vec<Effect>,
    transitions: Vec<Transition>,
}

impl Response {
    /// Create a response with the given text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            preconditions: Vec::new(),
            effects: Vec::new(),
            transitions: Vec::new(),
        }
    }

    /// Add a precondition.
    pub fn with_precondition(mut self, condition: Condition) -> Self {
        self.preconditions.push(condition);
        self
    }

    /// Add an effect, applied after those already added.
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Add a transition, tried after those already added.
    pub fn with_transition(mut self, transition: Transition) -> Self {
        self.transitions.push(transition);
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn preconditions(&self) -> &[Condition] {
        &self.preconditions
    }

    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Whether the response may be offered: every precondition holds.
    pub fn is_active(&self, globals: &Globals) -> bool {
        all_hold(&self.preconditions, globals)
    }

    /// Resolve the next prompt: the target of the first satisfied transition,
    /// or [`PromptId::TERMINAL`] when none is satisfied.
    pub fn next_prompt_id(&self, globals: &Globals) -> PromptId {
        self.transitions
            .iter()
            .find(|t| t.is_satisfied(globals))
            .map(|t| t.target)
            .unwrap_or(PromptId::TERMINAL)
    }

    /// Apply every effect in order, each seeing the changes of the ones before it.
    ///
    /// Stops at the first failing effect. Effects applied before the failure stay applied.
    pub fn apply_effects(&mut self, globals: &mut Globals) -> Result<(), ExpressionError> {
        for (index, effect) in self.effects.iter_mut().enumerate() {
            if let Err(err) = effect.apply(globals) {
                debug!(response = %self.text, effect = index, error = %err, "effect failed");
                return Err(err);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dialogue_rules::{ConditionOp, EffectOp, Operand};

    #[test]
    fn test_no_preconditions_is_active() {
        assert!(Response::new("Hello").is_active(&Globals::new()));
    }

    #[test]
    fn test_preconditions_gate() {
        let response = Response::new("Ask a favour")
            .with_precondition(Condition::compare("trust", ConditionOp::GreaterOrEqual, 5))
            .with_precondition(Condition::unset("insulted"));

        let mut globals = Globals::new();
        assert!(!response.is_active(&globals));

        globals.set("trust", 5);
        assert!(response.is_active(&globals));

        globals.set("insulted", 1);
        assert!(!response.is_active(&globals));
    }

    #[test]
    fn test_first_matching_transition_wins() {
        let response = Response::new("Go")
            .with_transition(
                Transition::new(PromptId(1)).with_condition(Condition::set("has_key")),
            )
            .with_transition(Transition::new(PromptId(2)));

        let mut globals = Globals::new();
        assert_eq!(response.next_prompt_id(&globals), PromptId(2));

        globals.set("has_key", 1);
        assert_eq!(response.next_prompt_id(&globals), PromptId(1));
    }

    #[test]
    fn test_unconditional_first_shadows_later() {
        let response = Response::new("Go")
            .with_transition(Transition::new(PromptId(3)))
            .with_transition(
                Transition::new(PromptId(1)).with_condition(Condition::unset("anything")),
            );

        assert_eq!(response.next_prompt_id(&Globals::new()), PromptId(3));
    }

    #[test]
    fn test_no_match_is_terminal() {
        let response = Response::new("Leave").with_transition(
            Transition::new(PromptId(1)).with_condition(Condition::compare(
                "gold",
                ConditionOp::Greater,
                100,
            )),
        );
        assert_eq!(response.next_prompt_id(&Globals::new()), PromptId::TERMINAL);
    }

    #[test]
    fn test_effects_are_sequential() {
        let mut response = Response::new("Trade")
            .with_effect(Effect::literal("gold", EffectOp::Assign, 10))
            .with_effect(
                Effect::new(
                    "change",
                    EffectOp::Assign,
                    Some(Operand::from_text("eval:gold - 3").unwrap()),
                )
                .unwrap(),
            );

        let mut globals = Globals::new();
        response.apply_effects(&mut globals).unwrap();
        assert_eq!(globals.get("gold"), 10);
        assert_eq!(globals.get("change"), 7);
    }

    #[test]
    fn test_failure_keeps_earlier_effects() {
        let mut response = Response::new("Risky")
            .with_effect(Effect::literal("a", EffectOp::Add, 1))
            .with_effect(
                Effect::new(
                    "b",
                    EffectOp::Assign,
                    Some(Operand::from_text("eval:1/0").unwrap()),
                )
                .unwrap(),
            )
            .with_effect(Effect::literal("c", EffectOp::Add, 1));

        let mut globals = Globals::new();
        assert!(response.apply_effects(&mut globals).is_err());
        assert_eq!(globals.get("a"), 1);
        assert!(!globals.contains("b"));
        assert!(!globals.contains("c"));
    }
}
