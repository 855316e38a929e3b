use axum::Json;

use dermascan_scoring::questionnaire::{questions, Question};

pub async fn list_questions() -> Json<Vec<Question>> {
    Json(questions().to_vec())
}
