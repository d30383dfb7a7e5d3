//! Checks that must hold after every command, whatever the user did.

use anyhow::{Result, ensure};

use yourvue_wizard::aptitudes::{AptitudesDraft, scenarios_for};
use yourvue_wizard::{
    CareerStage, SessionSnapshot, ValuesDraft, WizardProgress, WizardStorage, try_load_record,
};

pub fn check(storage: &dyn WizardStorage, snapshot: &SessionSnapshot) -> Result<()> {
    check_progress(storage, snapshot)?;
    check_values(storage)?;
    check_aptitudes(storage)?;
    check_shell(snapshot)
}

fn check_progress(storage: &dyn WizardStorage, snapshot: &SessionSnapshot) -> Result<()> {
    let Ok(Some(progress)) = try_load_record::<WizardProgress>(storage) else {
        return Ok(());
    };
    let mut completed: Vec<u8> = progress.completed_stages.iter().map(|s| s.get()).collect();
    completed.sort_unstable();
    for (expected, actual) in (1u8..).zip(&completed) {
        ensure!(
            expected == *actual,
            "completed stages {completed:?} skip stage {expected}"
        );
    }
    ensure!(
        usize::from(progress.current_stage.get()) <= completed.len() + 1,
        "stage {} entered with only {} stages completed",
        progress.current_stage,
        completed.len()
    );
    ensure!(
        progress.current_stage == snapshot.stage,
        "stored stage {} disagrees with the session ({})",
        progress.current_stage,
        snapshot.stage
    );
    Ok(())
}

fn check_values(storage: &dyn WizardStorage) -> Result<()> {
    let Ok(Some(values)) = try_load_record::<ValuesDraft>(storage) else {
        return Ok(());
    };
    for (category, picks) in &values.selections {
        ensure!(picks.len() <= 2, "{category} holds {} picks", picks.len());
    }
    ensure!(
        values.core_values.len() <= 3,
        "{} core values selected",
        values.core_values.len()
    );
    let pool = values.pool();
    for core in &values.core_values {
        ensure!(pool.contains(core), "core value {} is not in the pool", core.name);
    }
    Ok(())
}

fn check_aptitudes(storage: &dyn WizardStorage) -> Result<()> {
    let Ok(Some(aptitudes)) = try_load_record::<AptitudesDraft>(storage) else {
        return Ok(());
    };
    // Every career stage shares the SCN_Q1..3 ids.
    let known = scenarios_for(CareerStage::Unsure);
    for id in aptitudes.scenario_responses.keys() {
        ensure!(
            known.iter().any(|s| s.id == id.as_str()),
            "unknown scenario response {id}"
        );
    }
    Ok(())
}

fn check_shell(snapshot: &SessionSnapshot) -> Result<()> {
    let shell = &snapshot.shell;
    ensure!(shell.progress_percent <= 100, "progress above 100%");
    ensure!(
        snapshot.stage.get() > 3 || shell.nav_bar.is_none(),
        "stage {} shows the shell navigation bar",
        snapshot.stage
    );
    for item in &shell.stepper {
        ensure!(
            !item.clickable || snapshot.completed_stages.contains(&item.stage),
            "stepper lets the user jump to unfinished stage {}",
            item.stage
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use yourvue_wizard::{AssessmentSession, MemoryStorage, PROGRESS_KEY, WizardConfig};

    #[test]
    fn fresh_session_satisfies_every_check() {
        let storage = MemoryStorage::shared();
        let session = AssessmentSession::new(storage.clone(), WizardConfig::default(), 1);
        check(storage.as_ref(), &session.snapshot()).unwrap();
    }

    #[test]
    fn skipped_stages_are_detected() {
        let storage = MemoryStorage::shared();
        let session = AssessmentSession::new(storage.clone(), WizardConfig::default(), 1);
        storage
            .set(
                PROGRESS_KEY,
                r#"{"currentStage":1,"currentSubStep":"welcome","completedStages":[1,3],"stageValidation":{}}"#,
            )
            .unwrap();
        let err = check(storage.as_ref(), &session.snapshot()).unwrap_err();
        assert!(err.to_string().contains("skip stage 2"));
    }
}
