use axum::{extract::State, Json};
use std::sync::Arc;

use crate::{
    domain::story::{
        CreateStoryRequest, StoryRequest, StoryResponse, StoryService, StoryServiceApi,
    },
    error::AppResult,
};

pub struct StoryController {
    story_service: Arc<StoryService>,
}

impl StoryController {
    pub fn new(story_service: Arc<StoryService>) -> Self {
        Self { story_service }
    }

    /// POST /api/stories/generate - Generate a titled, illustrated story
    pub async fn generate(
        State(controller): State<Arc<StoryController>>,
        Json(request): Json<CreateStoryRequest>,
    ) -> AppResult<Json<StoryResponse>> {
        let request = StoryRequest::try_from(request)?;

        let story = controller.story_service.generate(&request).await?;

        Ok(Json(StoryResponse::new(story, &request)))
    }
}
