//! Scripted journeys through the wizard.

use anyhow::{Context, Result, bail, ensure};
use std::rc::Rc;

use yourvue_wizard::aptitudes::S3_DATA_KEY;
use yourvue_wizard::orientation::{S1_DATA_KEY, S1_POPUP_KEY};
use yourvue_wizard::values::S2_DATA_KEY;
use yourvue_wizard::{
    CareerStage, Command, LikertScore, MemoryStorage, Outcome, PROGRESS_KEY, ScenarioAnswer,
    StageId, StageView, WizardConfig,
};

use super::{ScenarioCtx, steps};
use crate::driver::WizardDriver;
use crate::storage::FileStorage;

const RECORD_KEYS: [&str; 5] = [PROGRESS_KEY, S1_DATA_KEY, S1_POPUP_KEY, S2_DATA_KEY, S3_DATA_KEY];

fn agree() -> LikertScore {
    LikertScore::SCALE[3]
}

pub fn smoke(_ctx: &ScenarioCtx, driver: &mut WizardDriver) -> Result<()> {
    steps::orientation(driver, CareerStage::Explorer, "Berlin")?;
    let snap = driver.snapshot();
    ensure!(snap.view.kind() == "values", "values stage not mounted");
    ensure!(
        snap.completed_stages == [StageId::ORIENTATION],
        "unexpected completed stages {:?}",
        snap.completed_stages
    );
    ensure!(snap.shell.progress_percent == 13, "progress {}%", snap.shell.progress_percent);
    Ok(())
}

pub fn full_assessment(_ctx: &ScenarioCtx, driver: &mut WizardDriver) -> Result<()> {
    steps::orientation(driver, CareerStage::Shifter, "Lisbon, Portugal")?;
    steps::values(driver, agree())?;
    steps::aptitudes(driver, agree(), ScenarioAnswer::B)?;
    steps::placeholders(driver, StageId::ACTION_PLAN)?;

    let snap = driver.snapshot();
    ensure!(snap.stage == StageId::ACTION_PLAN, "ended at stage {}", snap.stage);
    ensure!(snap.completed_stages.len() == 7, "{} stages completed", snap.completed_stages.len());
    ensure!(snap.shell.progress_percent == 88, "progress {}%", snap.shell.progress_percent);
    let bar = snap
        .shell
        .nav_bar
        .context("the last stage should use the shell navigation bar")?;
    ensure!(bar.continue_label == "Finish", "last stage labelled {}", bar.continue_label);
    Ok(())
}

pub fn returning_user(_ctx: &ScenarioCtx, driver: &mut WizardDriver) -> Result<()> {
    steps::orientation(driver, CareerStage::Starter, "Remote")?;
    driver.apply(Command::ClickStage {
        stage: StageId::ORIENTATION,
    })?;
    ensure!(driver.snapshot().sub_step == "welcome", "re-entry did not reset the sub-step");
    driver.apply(Command::ContinueFromOverview)?;
    driver.apply(Command::ContinueFromLocation)?;
    ensure!(
        driver.stage() == StageId::VALUES,
        "the popup was shown twice (stage {})",
        driver.stage()
    );
    Ok(())
}

pub fn popup_timeout(ctx: &ScenarioCtx, driver: &mut WizardDriver) -> Result<()> {
    driver.apply(Command::SelectCareerStage {
        stage: CareerStage::Advancer,
    })?;
    driver.apply(Command::ContinueFromOverview)?;
    driver.apply(Command::SkipLocation)?;
    let popup_open = |driver: &WizardDriver| -> Result<bool> {
        match driver.snapshot().view {
            StageView::Orientation(view) => Ok(view.popup_open),
            other => bail!("orientation unmounted, found {}", other.kind()),
        }
    };
    ensure!(popup_open(driver)?, "popup did not open");

    driver.advance(ctx.cfg.orientation.popup_auto_dismiss_ms - 1);
    ensure!(popup_open(driver)?, "popup closed early");
    driver.advance(1);
    ensure!(!popup_open(driver)?, "popup did not auto-dismiss");
    ensure!(driver.stage() == StageId::ORIENTATION, "auto-dismiss left the stage");
    Ok(())
}

pub fn analysis_retry(ctx: &ScenarioCtx, driver: &mut WizardDriver) -> Result<()> {
    let mut cfg: WizardConfig = ctx.cfg.clone();
    let threshold_ms = cfg.analysis.retry_threshold_secs * 1_000;
    cfg.analysis.first_run_ms = threshold_ms + 10_000;
    *driver = WizardDriver::new(MemoryStorage::shared(), cfg.clone(), ctx.seed);

    steps::orientation(driver, CareerStage::Unsure, "Remote")?;
    steps::values(driver, agree())?;
    driver.apply(Command::SetResumeMode {
        mode: yourvue_wizard::ResumeMode::Paste,
    })?;
    driver.apply(Command::SetPastedText {
        text: "Nurse turned data analyst. SQL, Python, mentoring.".to_string(),
    })?;
    driver.apply(Command::SetConsent { consented: true })?;
    driver.apply(Command::Analyze)?;
    driver.expect_rejected(Command::RetryAnalysis)?;

    driver.advance(threshold_ms + 1_000);
    let StageView::Aptitudes(view) = driver.snapshot().view else {
        bail!("aptitudes stage not mounted");
    };
    let analysis = view.analysis.context("analysis finished before the threshold")?;
    ensure!(analysis.retry_available, "retry not offered after {}s", analysis.elapsed_secs);

    driver.apply(Command::RetryAnalysis)?;
    driver.advance(cfg.analysis.retry_ms);
    let StageView::Aptitudes(view) = driver.snapshot().view else {
        bail!("aptitudes stage not mounted");
    };
    ensure!(view.analysis.is_none(), "retry did not complete the analysis");
    ensure!(view.sub_step == 2, "retry landed on sub-step {}", view.sub_step);
    Ok(())
}

pub fn exit_keeps_data(_ctx: &ScenarioCtx, driver: &mut WizardDriver) -> Result<()> {
    steps::orientation(driver, CareerStage::Explorer, "Berlin")?;
    let storage = driver.storage();
    let before: Vec<Option<String>> = RECORD_KEYS
        .iter()
        .map(|key| storage.get(key))
        .collect::<Result<_, _>>()?;

    driver.expect_rejected(Command::Leave)?;
    driver.apply(Command::RequestExit)?;
    ensure!(driver.snapshot().shell.exit_dialog_open, "exit dialog did not open");
    driver.apply(Command::Stay)?;
    ensure!(!driver.snapshot().shell.exit_dialog_open, "stay did not close the dialog");
    driver.apply(Command::RequestExit)?;
    let outcome = driver.send(Command::Leave);
    ensure!(outcome == Outcome::Exited, "leave returned {outcome:?}");

    for (key, old) in RECORD_KEYS.iter().zip(before) {
        ensure!(storage.get(key)? == old, "leaving changed `{key}`");
    }
    Ok(())
}

pub fn reload_resume(ctx: &ScenarioCtx, driver: &mut WizardDriver) -> Result<()> {
    let path = ctx.state_dir.join(format!("reload-{}.json", ctx.seed));
    if path.exists() {
        std::fs::remove_file(&path).with_context(|| format!("clearing {}", path.display()))?;
    }
    let storage = Rc::new(FileStorage::open(&path)?);
    *driver = WizardDriver::new(storage, ctx.cfg.clone(), ctx.seed);
    steps::orientation(driver, CareerStage::Advancer, "Toronto, Canada")?;
    steps::values(driver, agree())?;
    steps::resume_analysis(driver)?;

    let reopened = Rc::new(FileStorage::open(&path)?);
    ensure!(!reopened.is_empty(), "nothing reached {}", path.display());
    *driver = WizardDriver::new(reopened, ctx.cfg.clone(), ctx.seed.wrapping_add(1));
    ensure!(driver.stage() == StageId::APTITUDES, "reloaded at stage {}", driver.stage());
    let StageView::Aptitudes(view) = driver.snapshot().view else {
        bail!("aptitudes stage not mounted after reload");
    };
    ensure!(view.sub_step == 2, "reload resumed at sub-step {}", view.sub_step);
    ensure!(
        view.career_stage == CareerStage::Advancer,
        "scenarios follow {:?}",
        view.career_stage
    );
    let _ = std::fs::remove_file(&path);
    Ok(())
}
