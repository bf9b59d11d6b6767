pub use super::community::Entity as Community;
pub use super::community_member::Entity as CommunityMember;
pub use super::event::Entity as Event;
pub use super::event_participant::Entity as EventParticipant;
pub use super::friendship::Entity as Friendship;
pub use super::game::Entity as Game;
pub use super::join_request::Entity as JoinRequest;
pub use super::marketplace_offer::Entity as MarketplaceOffer;
pub use super::poll::Entity as Poll;
pub use super::poll_option::Entity as PollOption;
pub use super::poll_vote::Entity as PollVote;
pub use super::search_ad::Entity as SearchAd;
pub use super::user::Entity as User;
