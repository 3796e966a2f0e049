mod favorites;
mod genre;
mod payment;
mod user;
mod wire;

pub use favorites::{
    check_favorite, list_favorites, toggle_favorite, FavoriteAction, FavoritesError, FavoritesUpdate,
};
pub use genre::{list_genre_names, Genre, DEFAULT_GENRES};
pub use payment::{
    payment_signature, verify_payment_signature, NewOrder, OrderError, OrderService, OrderStatus,
    PaymentOrder, PaymentProvider, ProviderError, ProviderOrder, ProviderOrderRequest, RejectReason,
    Verification, VerificationService,
};
pub use user::{SessionClaims, User, UserPreferences, AUTH_TOKEN_TTL_SECS};
pub use wire::{
    CreateOrderRequest, CreateOrderResponse, CurrentUserResponse, FavoriteCheckResponse,
    FavoriteToggleResponse, FavoritesResponse, VerifyPaymentRequest, VerifyPaymentResponse,
    DEFAULT_CURRENCY,
};
