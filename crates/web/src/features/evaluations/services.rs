use chrono::NaiveDateTime;
use storage::{
    dto::evaluation::{
        CreateEvaluationRequest, GlobalEvaluationAverage, PlayerEvaluationAverage,
        PositionEvaluationAverage, UpdateEvaluationRequest,
    },
    error::{Result, StorageError},
    models::{PlayerEvaluation, new_id},
    repository::{evaluation::EvaluationRepository, player::PlayerRepository},
    services::evaluation_scoring::{rollup, score_themes},
    store::DocumentStore,
};

/// Score and store an evaluation. A second evaluation of the same type for
/// the same player replaces the first and keeps its id.
pub async fn evaluate_player(
    store: &dyn DocumentStore,
    evaluator_id: &str,
    now: NaiveDateTime,
    request: &CreateEvaluationRequest,
) -> Result<PlayerEvaluation> {
    if !PlayerRepository::new(store).exists(&request.player_id).await? {
        return Err(StorageError::validation(format!(
            "Player {} not found",
            request.player_id
        )));
    }

    let mut themes = request.themes.clone();
    let overall_average = score_themes(&mut themes);

    let evaluation = PlayerEvaluation {
        id: new_id(),
        player_id: request.player_id.clone(),
        evaluator_id: evaluator_id.to_string(),
        evaluation_date: request.evaluation_date.unwrap_or(now),
        evaluation_type: request
            .evaluation_type
            .clone()
            .unwrap_or_else(|| PlayerEvaluation::DEFAULT_TYPE.to_string()),
        themes,
        overall_average: Some(overall_average),
        notes: request.notes.clone(),
    };

    let stored = EvaluationRepository::new(store).upsert(&evaluation).await?;
    tracing::info!(
        player_id = %stored.player_id,
        evaluation_type = %stored.evaluation_type,
        overall_average,
        "Stored evaluation"
    );
    Ok(stored)
}

pub async fn list_evaluations(store: &dyn DocumentStore) -> Result<Vec<PlayerEvaluation>> {
    EvaluationRepository::new(store).list().await
}

/// A player's evaluations, newest first
pub async fn list_player_evaluations(
    store: &dyn DocumentStore,
    player_id: &str,
) -> Result<Vec<PlayerEvaluation>> {
    EvaluationRepository::new(store).list_for_player(player_id).await
}

/// Most recent evaluation of a player; not found when there is none
pub async fn latest_player_evaluation(
    store: &dyn DocumentStore,
    player_id: &str,
) -> Result<PlayerEvaluation> {
    EvaluationRepository::new(store)
        .latest_for_player(player_id)
        .await?
        .ok_or(StorageError::NotFound)
}

/// Theme roll-up over a player's evaluations; not found when there is none
pub async fn player_average(
    store: &dyn DocumentStore,
    player_id: &str,
) -> Result<PlayerEvaluationAverage> {
    let evaluations = EvaluationRepository::new(store)
        .list_for_player(player_id)
        .await?;

    if evaluations.is_empty() {
        return Err(StorageError::NotFound);
    }

    Ok(PlayerEvaluationAverage {
        player_id: player_id.to_string(),
        rollup: rollup(&evaluations),
        evaluation_count: evaluations.len(),
    })
}

/// Theme roll-up over every evaluation on record
pub async fn global_average(store: &dyn DocumentStore) -> Result<GlobalEvaluationAverage> {
    let evaluations = EvaluationRepository::new(store).list().await?;

    Ok(GlobalEvaluationAverage {
        rollup: rollup(&evaluations),
        total_evaluations: evaluations.len(),
    })
}

/// Theme roll-up over the evaluations of every player in `position`
pub async fn position_average(
    store: &dyn DocumentStore,
    position: &str,
) -> Result<PositionEvaluationAverage> {
    let players = PlayerRepository::new(store)
        .list_by_position(position)
        .await?;
    let player_ids: Vec<String> = players.iter().map(|p| p.id.clone()).collect();

    let evaluations = EvaluationRepository::new(store)
        .list_for_players(&player_ids)
        .await?;

    Ok(PositionEvaluationAverage {
        position: position.to_string(),
        rollup: rollup(&evaluations),
        total_evaluations: evaluations.len(),
        players_count: players.len(),
    })
}

/// Replace the themes and/or notes of an evaluation, re-scoring it
pub async fn update_evaluation(
    store: &dyn DocumentStore,
    id: &str,
    request: &UpdateEvaluationRequest,
) -> Result<PlayerEvaluation> {
    if request.themes.is_none() && request.notes.is_none() {
        return Err(StorageError::validation("No data to update"));
    }

    let repo = EvaluationRepository::new(store);
    let mut evaluation = repo.find_by_id(id).await?;

    if let Some(themes) = &request.themes {
        evaluation.themes = themes.clone();
    }
    if let Some(notes) = &request.notes {
        evaluation.notes = Some(notes.clone());
    }
    evaluation.overall_average = Some(score_themes(&mut evaluation.themes));

    repo.save_scores(&evaluation).await
}

pub async fn delete_evaluation(store: &dyn DocumentStore, id: &str) -> Result<()> {
    EvaluationRepository::new(store).delete(id).await
}
