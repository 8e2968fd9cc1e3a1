pub(crate) mod ad_service;
