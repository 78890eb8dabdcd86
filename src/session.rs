// ABOUTME: Cooking-mode state machine for step-by-step instruction walkthroughs
// ABOUTME: Cursor bounded to the instruction list; finishing at the last step ends the session
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Saveur Contributors

/// Result of a step-navigation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Cursor moved to a new step
    Moved,
    /// Cursor was already at the boundary; nothing changed
    AtBoundary,
    /// "Next" was invoked on the last step: the session is complete
    /// and has been torn down
    Completed,
}

/// Ephemeral guided walkthrough of a recipe's instructions.
///
/// Process-local and never persisted. States: `Idle -> Active(step i)
/// -> Idle`. While active the cursor stays within `[0, len - 1]`;
/// advancing from the last step completes the session instead of
/// moving.
#[derive(Debug, Clone, Default)]
pub struct CookingSession {
    steps: Vec<String>,
    cursor: usize,
    active: bool,
}

impl CookingSession {
    /// Start a session over the given instruction steps, cursor at 0.
    ///
    /// A recipe without instructions gets a single placeholder step so
    /// the walkthrough view always has something to show.
    pub fn start(&mut self, instructions: &[String]) {
        self.steps = if instructions.is_empty() {
            vec!["No instructions.".to_owned()]
        } else {
            instructions.to_vec()
        };
        self.cursor = 0;
        self.active = true;
    }

    /// End the session and drop its steps
    pub fn finish(&mut self) {
        self.steps.clear();
        self.cursor = 0;
        self.active = false;
    }

    /// Whether a walkthrough is in progress
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Zero-based cursor position, if active
    #[must_use]
    pub const fn cursor(&self) -> Option<usize> {
        if self.active {
            Some(self.cursor)
        } else {
            None
        }
    }

    /// Number of steps in the active walkthrough
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// True when no walkthrough is active
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.active || self.steps.is_empty()
    }

    /// The instruction text under the cursor, if active
    #[must_use]
    pub fn current_step(&self) -> Option<&str> {
        if self.active {
            self.steps.get(self.cursor).map(String::as_str)
        } else {
            None
        }
    }

    /// True when the cursor sits on the final step
    #[must_use]
    pub fn at_last_step(&self) -> bool {
        self.active && self.cursor + 1 == self.steps.len()
    }

    /// Advance the cursor. At the last step this completes and tears
    /// down the session instead of moving.
    pub fn next_step(&mut self) -> StepOutcome {
        if !self.active {
            return StepOutcome::AtBoundary;
        }
        if self.at_last_step() {
            self.finish();
            return StepOutcome::Completed;
        }
        self.cursor += 1;
        StepOutcome::Moved
    }

    /// Move the cursor back one step; a no-op at step 0
    pub fn prev_step(&mut self) -> StepOutcome {
        if !self.active || self.cursor == 0 {
            return StepOutcome::AtBoundary;
        }
        self.cursor -= 1;
        StepOutcome::Moved
    }
}
