// End-to-end tests for the Storytime Backend API
//
// Each test gets its own server bound to an ephemeral port. Provider
// repositories are replaced by scripted in-memory mocks, so the full stack
// (router, middleware, controllers, services, retry executor) runs without
// network access. The Polly repository is exercised against an unreachable
// endpoint to check failure classification.

mod test_catalog;
mod test_health;
mod test_speech;
