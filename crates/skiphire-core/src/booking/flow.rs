//! Booking progress state machine.

use crate::cart::Navigator;
use crate::catalog::DerivedOffering;
use crate::CommerceError;
use serde::Serialize;
use tracing::info;

/// Steps of the booking journey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStep {
    /// Delivery postcode.
    Postcode,
    /// Type of waste.
    WasteType,
    /// Skip size choice.
    SelectSkip,
    /// Road permit check.
    PermitCheck,
    /// Delivery date.
    ChooseDate,
}

impl BookingStep {
    /// All steps in order.
    pub const ALL: [BookingStep; 5] = [
        BookingStep::Postcode,
        BookingStep::WasteType,
        BookingStep::SelectSkip,
        BookingStep::PermitCheck,
        BookingStep::ChooseDate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStep::Postcode => "postcode",
            BookingStep::WasteType => "waste_type",
            BookingStep::SelectSkip => "select_skip",
            BookingStep::PermitCheck => "permit_check",
            BookingStep::ChooseDate => "choose_date",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            BookingStep::Postcode => "Postcode",
            BookingStep::WasteType => "Waste Type",
            BookingStep::SelectSkip => "Select Skip",
            BookingStep::PermitCheck => "Permit Check",
            BookingStep::ChooseDate => "Choose Date",
        }
    }

    /// Get the step number (1-indexed).
    pub fn number(&self) -> u8 {
        match self {
            BookingStep::Postcode => 1,
            BookingStep::WasteType => 2,
            BookingStep::SelectSkip => 3,
            BookingStep::PermitCheck => 4,
            BookingStep::ChooseDate => 5,
        }
    }

    fn next(&self) -> Option<BookingStep> {
        match self {
            BookingStep::Postcode => Some(BookingStep::WasteType),
            BookingStep::WasteType => Some(BookingStep::SelectSkip),
            BookingStep::SelectSkip => Some(BookingStep::PermitCheck),
            BookingStep::PermitCheck => Some(BookingStep::ChooseDate),
            BookingStep::ChooseDate => None,
        }
    }
}

/// Where the user is in the booking journey.
///
/// A selection session starts on [`BookingStep::SelectSkip`] with the
/// postcode and waste type already done.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingFlow {
    step: BookingStep,
    completed_steps: Vec<BookingStep>,
    chosen_skip: Option<DerivedOffering>,
}

impl Default for BookingFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingFlow {
    pub fn new() -> Self {
        Self {
            step: BookingStep::SelectSkip,
            completed_steps: vec![BookingStep::Postcode, BookingStep::WasteType],
            chosen_skip: None,
        }
    }

    pub fn step(&self) -> BookingStep {
        self.step
    }

    pub fn completed_steps(&self) -> &[BookingStep] {
        &self.completed_steps
    }

    pub fn chosen_skip(&self) -> Option<&DerivedOffering> {
        self.chosen_skip.as_ref()
    }

    /// Check if the flow can advance to a step.
    pub fn can_advance_to(&self, step: BookingStep) -> bool {
        match step {
            BookingStep::Postcode | BookingStep::WasteType | BookingStep::SelectSkip => true,
            BookingStep::PermitCheck | BookingStep::ChooseDate => self.chosen_skip.is_some(),
        }
    }

    /// Advance to the next step.
    pub fn advance(&mut self) -> Result<BookingStep, CommerceError> {
        let next = self
            .step
            .next()
            .ok_or_else(|| CommerceError::InvalidStepTransition {
                from: self.step.as_str().to_string(),
                to: "none".to_string(),
            })?;

        if !self.can_advance_to(next) {
            return Err(CommerceError::BookingIncomplete("skip selection".to_string()));
        }

        if !self.completed_steps.contains(&self.step) {
            self.completed_steps.push(self.step);
        }
        self.step = next;
        Ok(next)
    }

    /// Whether a step has been completed.
    pub fn is_completed(&self, step: BookingStep) -> bool {
        self.completed_steps.contains(&step)
    }

    /// Get progress percentage.
    pub fn progress_percent(&self) -> u8 {
        (self.step.number() as usize * 100 / BookingStep::ALL.len()) as u8
    }
}

impl Navigator for BookingFlow {
    fn proceed(&mut self, item: &DerivedOffering) -> Result<(), CommerceError> {
        if self.step != BookingStep::SelectSkip {
            return Err(CommerceError::InvalidStepTransition {
                from: self.step.as_str().to_string(),
                to: BookingStep::PermitCheck.as_str().to_string(),
            });
        }

        self.chosen_skip = Some(item.clone());
        let next = self.advance()?;
        info!(id = %item.id, size = item.size, step = next.as_str(), "continuing booking");
        Ok(())
    }
}
