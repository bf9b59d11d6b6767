mod community;
mod event;
mod friendship;
mod game;
mod join_request;
mod membership;
mod offer;
mod poll;
mod search_ad;
mod user;
