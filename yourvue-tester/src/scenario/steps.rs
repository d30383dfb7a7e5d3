//! Reusable stage walkthroughs shared by the scripted scenarios.

use anyhow::{Result, ensure};

use yourvue_wizard::aptitudes::APTITUDES_LIKERT_QUESTIONS;
use yourvue_wizard::values::{VALUE_CATEGORIES, VALUES_LIKERT_QUESTIONS};
use yourvue_wizard::{
    CareerMotivation, CareerStage, Command, CoreValue, FileDescriptor, LikertScore, ScenarioAnswer,
    StageId, StageView,
};

use crate::driver::WizardDriver;

pub const DOCX: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

pub fn resume_file() -> FileDescriptor {
    FileDescriptor {
        name: "resume.docx".to_string(),
        size: 48_000,
        mime_type: DOCX.to_string(),
    }
}

pub fn orientation(driver: &mut WizardDriver, stage: CareerStage, location: &str) -> Result<()> {
    driver.apply(Command::SelectCareerStage { stage })?;
    driver.apply(Command::ContinueFromOverview)?;
    driver.apply(Command::PickLocation {
        location: location.to_string(),
    })?;
    driver.apply(Command::ContinueFromLocation)?;
    if driver.stage() == StageId::ORIENTATION {
        driver.apply(Command::StartNow)?;
    }
    ensure!(
        driver.stage() == StageId::VALUES,
        "orientation ended at stage {}",
        driver.stage()
    );
    Ok(())
}

pub fn values(driver: &mut WizardDriver, score: LikertScore) -> Result<()> {
    for category in &VALUE_CATEGORIES {
        for value in &category.values[..2] {
            driver.apply(Command::ToggleValue {
                category: category.id.to_string(),
                value: (*value).to_string(),
            })?;
        }
    }
    driver.apply(Command::ValuesContinue)?;
    for category in &VALUE_CATEGORIES[..3] {
        driver.apply(Command::ToggleCoreValue {
            value: CoreValue::new(category.values[0], category.label),
        })?;
    }
    driver.apply(Command::ValuesContinue)?;
    driver.apply(Command::SetExplanation {
        text: "They are what I fall back on when work gets hard.".to_string(),
    })?;
    driver.apply(Command::ValuesContinue)?;
    for question in &VALUES_LIKERT_QUESTIONS {
        driver.apply(Command::AnswerValuesLikert {
            question: question.id.to_string(),
            score,
        })?;
    }
    driver.apply(Command::ValuesContinue)?;
    driver.apply(Command::ChooseMotivation {
        motivation: CareerMotivation::Learning,
    })?;
    driver.apply(Command::ValuesContinue)?;
    ensure!(
        driver.stage() == StageId::APTITUDES,
        "values ended at stage {}",
        driver.stage()
    );
    Ok(())
}

/// Upload, consent and wait out the analysis; leaves the user on review.
pub fn resume_analysis(driver: &mut WizardDriver) -> Result<()> {
    driver.apply(Command::ChooseFile {
        file: resume_file(),
    })?;
    driver.apply(Command::SetConsent { consented: true })?;
    driver.apply(Command::Analyze)?;
    driver.drain()?;
    let StageView::Aptitudes(view) = driver.snapshot().view else {
        anyhow::bail!("aptitudes stage unmounted during analysis");
    };
    ensure!(view.analysis.is_none(), "analysis still running after drain");
    ensure!(view.sub_step == 2, "expected review, found sub-step {}", view.sub_step);
    Ok(())
}

pub fn aptitudes(driver: &mut WizardDriver, score: LikertScore, answer: ScenarioAnswer) -> Result<()> {
    resume_analysis(driver)?;
    driver.apply(Command::AptitudesContinue)?;
    for question in &APTITUDES_LIKERT_QUESTIONS {
        driver.apply(Command::AnswerAptitudeLikert {
            question: question.id.to_string(),
            score,
        })?;
    }
    driver.apply(Command::AptitudesContinue)?;
    for id in ["SCN_Q1", "SCN_Q2", "SCN_Q3"] {
        driver.apply(Command::AnswerScenario {
            scenario: id.to_string(),
            answer,
        })?;
    }
    driver.apply(Command::AptitudesContinue)?;
    ensure!(
        driver.stage() == StageId::INTERESTS,
        "aptitudes ended at stage {}",
        driver.stage()
    );
    Ok(())
}

/// Validate and continue through the placeholder stages up to `last`.
pub fn placeholders(driver: &mut WizardDriver, last: StageId) -> Result<()> {
    while driver.stage() < last {
        driver.expect_rejected(Command::Continue)?;
        driver.apply(Command::MarkStageValid { valid: true })?;
        driver.apply(Command::Continue)?;
    }
    driver.apply(Command::MarkStageValid { valid: true })
}
