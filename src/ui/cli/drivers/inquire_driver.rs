use crate::ui::cli::drivers::PromptDriver;
use anyhow::Result;
use inquire::{Confirm, CustomType, Text, validator::Validation};
use std::fmt::Display;

pub struct InquireDriver;

fn bounds_check<T: PartialOrd + Display>(x: T, min: Option<T>, max: Option<T>) -> Validation {
    if let Some(lo) = &min {
        if x < *lo {
            return Validation::Invalid(format!("Must be ≥ {lo}").into());
        }
    }
    if let Some(hi) = &max {
        if x > *hi {
            return Validation::Invalid(format!("Must be ≤ {hi}").into());
        }
    }
    Validation::Valid
}

impl PromptDriver for InquireDriver {
    fn ask_bool(&self, title: &str, help: &str, default: bool) -> Result<bool> {
        Ok(Confirm::new(title)
            .with_default(default)
            .with_help_message(help)
            .prompt()?)
    }

    fn ask_string(&self, title: &str, help: &str, default: &str) -> Result<String> {
        Ok(Text::new(title)
            .with_initial_value(default)
            .with_help_message(help)
            .prompt()?)
    }

    fn ask_u64(
        &self,
        title: &str,
        help: &str,
        default: u64,
        min: Option<u64>,
        max: Option<u64>,
    ) -> Result<u64> {
        let mut q = CustomType::<u64>::new(title)
            .with_default(default)
            .with_help_message(help);
        if min.is_some() || max.is_some() {
            q = q.with_validator(move |x: &u64| Ok(bounds_check(*x, min, max)));
        }
        Ok(q.prompt()?)
    }

    fn ask_f64(
        &self,
        title: &str,
        help: &str,
        default: f64,
        min: Option<f64>,
        max: Option<f64>,
    ) -> Result<f64> {
        let mut q = CustomType::<f64>::new(title)
            .with_default(default)
            .with_help_message(help);
        if min.is_some() || max.is_some() {
            q = q.with_validator(move |x: &f64| Ok(bounds_check(*x, min, max)));
        }
        Ok(q.prompt()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_check_accepts_inside_range() {
        assert!(matches!(
            bounds_check(5u64, Some(1), Some(10)),
            Validation::Valid
        ));
        assert!(matches!(bounds_check(5.0, None, None), Validation::Valid));
    }

    #[test]
    fn bounds_check_rejects_outside_range() {
        assert!(matches!(
            bounds_check(0u64, Some(1), None),
            Validation::Invalid(_)
        ));
        assert!(matches!(
            bounds_check(1.5, Some(0.0), Some(1.0)),
            Validation::Invalid(_)
        ));
    }
}
