use es_inference::SummaryRequester;

pub struct AppState {
    pub requester: SummaryRequester,
}
