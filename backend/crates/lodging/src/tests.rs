//! Unit tests for Lodging crate

#[cfg(test)]
mod support {
    use std::sync::Arc;

    use auth::{Caller, Identity};
    use auth::models::email::Email;
    use chrono::NaiveDate;
    use kernel::id::{PlaceId, UserId};

    use crate::domain::entities::{BookingDetails, PlaceDetails};
    use crate::domain::value_objects::StayDates;
    use crate::infra::memory::MemoryLodgingRepository;

    pub fn repo() -> Arc<MemoryLodgingRepository> {
        Arc::new(MemoryLodgingRepository::new())
    }

    pub fn caller(email: &str) -> Caller {
        Caller::Authenticated(Identity::new(UserId::new(), Email::new(email).unwrap()))
    }

    pub fn id_of(caller: &Caller) -> UserId {
        caller.identity().unwrap().id
    }

    pub fn cabin() -> PlaceDetails {
        PlaceDetails {
            title: "Cabin".into(),
            address: "1 Lake Rd".into(),
            photos: vec!["cabin.jpg".into()],
            description: "Quiet".into(),
            perks: vec!["wifi".into()],
            check_in: "14:00".into(),
            check_out: "11:00".into(),
            max_guests: 4,
            price: 120,
            ..Default::default()
        }
    }

    pub fn stay(place_id: PlaceId, guests: i32) -> BookingDetails {
        BookingDetails {
            place_id,
            stay: StayDates::new(
                NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
                NaiveDate::from_ymd_opt(2025, 6, 3).unwrap(),
            )
            .unwrap(),
            guests,
            total: 240,
        }
    }
}

#[cfg(test)]
mod place_tests {
    use auth::Caller;
    use kernel::id::PlaceId;

    use super::support::*;
    use crate::application::PlaceUseCase;
    use crate::domain::entities::PlaceDetails;
    use crate::error::{LodgingError, Resource};

    #[tokio::test]
    async fn test_owner_is_the_caller() {
        let places = PlaceUseCase::new(repo());
        let ann = caller("ann@x.io");

        let place = places.create(&ann, cabin()).await.unwrap();
        assert_eq!(place.owner, id_of(&ann));
    }

    #[tokio::test]
    async fn test_other_user_cannot_delete() {
        let places = PlaceUseCase::new(repo());
        let a = caller("a@x.io");
        let b = caller("b@x.io");

        let place = places.create(&a, cabin()).await.unwrap();

        let err = places.delete(&b, &place.id).await.unwrap_err();
        assert!(matches!(
            err,
            LodgingError::Forbidden {
                resource: Resource::Place,
                ..
            }
        ));
        assert!(places.get(&place.id).await.is_ok());

        places.delete(&a, &place.id).await.unwrap();
        assert!(matches!(
            places.get(&place.id).await,
            Err(LodgingError::NotFound(Resource::Place))
        ));
    }

    #[tokio::test]
    async fn test_other_user_cannot_update() {
        let places = PlaceUseCase::new(repo());
        let a = caller("a@x.io");
        let place = places.create(&a, cabin()).await.unwrap();

        let renamed = PlaceDetails {
            title: "Mine now".into(),
            ..cabin()
        };
        let err = places
            .update(&caller("b@x.io"), &place.id, renamed.clone())
            .await
            .unwrap_err();
        assert!(matches!(err, LodgingError::Forbidden { .. }));

        let updated = places.update(&a, &place.id, renamed).await.unwrap();
        assert_eq!(updated.details.title, "Mine now");
        assert_eq!(updated.owner, id_of(&a));
    }

    #[tokio::test]
    async fn test_anonymous_is_unauthenticated_even_for_missing_place() {
        let places = PlaceUseCase::new(repo());

        assert!(matches!(
            places.delete(&Caller::Anonymous, &PlaceId::new()).await,
            Err(LodgingError::Unauthenticated)
        ));
        assert!(matches!(
            places.create(&Caller::Anonymous, cabin()).await,
            Err(LodgingError::Unauthenticated)
        ));
        assert!(matches!(
            places.list_own(&Caller::Anonymous).await,
            Err(LodgingError::Unauthenticated)
        ));
    }

    #[tokio::test]
    async fn test_missing_place_is_not_found() {
        let places = PlaceUseCase::new(repo());
        assert!(matches!(
            places.update(&caller("a@x.io"), &PlaceId::new(), cabin()).await,
            Err(LodgingError::NotFound(Resource::Place))
        ));
    }

    #[tokio::test]
    async fn test_invalid_details_rejected() {
        let places = PlaceUseCase::new(repo());
        let bad = PlaceDetails {
            max_guests: 0,
            ..cabin()
        };
        assert!(matches!(
            places.create(&caller("a@x.io"), bad).await,
            Err(LodgingError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_own_list_and_public_list() {
        let places = PlaceUseCase::new(repo());
        let a = caller("a@x.io");
        let b = caller("b@x.io");

        places.create(&a, cabin()).await.unwrap();
        places.create(&a, cabin()).await.unwrap();
        places.create(&b, cabin()).await.unwrap();

        assert_eq!(places.list_own(&a).await.unwrap().len(), 2);
        assert_eq!(places.list_own(&b).await.unwrap().len(), 1);
        assert_eq!(places.list_all().await.unwrap().len(), 3);
    }
}

#[cfg(test)]
mod booking_tests {
    use auth::Caller;
    use kernel::id::{BookingId, PlaceId};

    use super::support::*;
    use crate::application::{BookingUseCase, PlaceUseCase};
    use crate::error::{LodgingError, Resource};

    #[tokio::test]
    async fn test_booker_is_the_caller() {
        let repo = repo();
        let host = caller("host@x.io");
        let guest = caller("guest@x.io");
        let place = PlaceUseCase::new(repo.clone())
            .create(&host, cabin())
            .await
            .unwrap();

        let booking = BookingUseCase::new(repo)
            .create(&guest, stay(place.id, 2))
            .await
            .unwrap();
        assert_eq!(booking.booker, id_of(&guest));
        assert_eq!(booking.stay.nights(), 2);
    }

    #[tokio::test]
    async fn test_booking_missing_place() {
        let bookings = BookingUseCase::new(repo());
        assert!(matches!(
            bookings.create(&caller("g@x.io"), stay(PlaceId::new(), 1)).await,
            Err(LodgingError::NotFound(Resource::Place))
        ));
    }

    #[tokio::test]
    async fn test_too_many_guests() {
        let repo = repo();
        let place = PlaceUseCase::new(repo.clone())
            .create(&caller("host@x.io"), cabin())
            .await
            .unwrap();

        assert!(matches!(
            BookingUseCase::new(repo)
                .create(&caller("g@x.io"), stay(place.id, 5))
                .await,
            Err(LodgingError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_only_booker_may_delete() {
        let repo = repo();
        let place = PlaceUseCase::new(repo.clone())
            .create(&caller("host@x.io"), cabin())
            .await
            .unwrap();
        let bookings = BookingUseCase::new(repo);
        let guest = caller("guest@x.io");
        let booking = bookings.create(&guest, stay(place.id, 1)).await.unwrap();

        assert!(matches!(
            bookings.delete(&caller("other@x.io"), &booking.id).await,
            Err(LodgingError::Forbidden {
                resource: Resource::Booking,
                ..
            })
        ));
        assert!(matches!(
            bookings.delete(&Caller::Anonymous, &booking.id).await,
            Err(LodgingError::Unauthenticated)
        ));

        bookings.delete(&guest, &booking.id).await.unwrap();
        assert!(bookings.list_own(&guest).await.unwrap().is_empty());
        assert!(matches!(
            bookings.delete(&guest, &BookingId::new()).await,
            Err(LodgingError::NotFound(Resource::Booking))
        ));
    }

    #[tokio::test]
    async fn test_list_own_includes_place_and_survives_deletion() {
        let repo = repo();
        let host = caller("host@x.io");
        let places = PlaceUseCase::new(repo.clone());
        let place = places.create(&host, cabin()).await.unwrap();

        let bookings = BookingUseCase::new(repo);
        let guest = caller("guest@x.io");
        bookings.create(&guest, stay(place.id, 1)).await.unwrap();

        let listed = bookings.list_own(&guest).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].place.as_ref().unwrap().id, place.id);
        assert!(bookings.list_own(&host).await.unwrap().is_empty());

        // Deleting the place takes its bookings with it
        places.delete(&host, &place.id).await.unwrap();
        assert!(bookings.list_own(&guest).await.unwrap().is_empty());
    }
}

#[cfg(test)]
mod router_tests {
    use std::sync::Arc;

    use auth::{AuthConfig, AuthFlow, MemoryUserRepository, with_session};
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use platform::password::{PasswordPolicy, WorkFactor};
    use tower::ServiceExt;

    use crate::infra::memory::MemoryLodgingRepository;
    use crate::presentation::dto::{BookingResponse, PlaceResponse};
    use crate::presentation::router::lodging_router_generic;

    fn app() -> Router {
        let config = AuthConfig {
            work_factor: WorkFactor::new(64, 1, 1).unwrap(),
            password_policy: PasswordPolicy::permissive(),
            ..AuthConfig::with_random_secret()
        };
        let flow =
            Arc::new(AuthFlow::new(Arc::new(MemoryUserRepository::new()), config).unwrap());
        let routes = auth::auth_router_generic(flow.clone())
            .merge(lodging_router_generic(Arc::new(MemoryLodgingRepository::new())));
        with_session(routes, flow.session_context())
    }

    fn request(method: &str, uri: &str, cookie: Option<&str>, body: &str) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn session_for(app: &Router, email: &str) -> String {
        app.clone()
            .oneshot(request(
                "POST",
                "/register",
                None,
                &format!(r#"{{"name":"User","email":"{email}","password":"pw"}}"#),
            ))
            .await
            .unwrap();
        let login = app
            .clone()
            .oneshot(request(
                "POST",
                "/login",
                None,
                &format!(r#"{{"email":"{email}","password":"pw"}}"#),
            ))
            .await
            .unwrap();
        login.headers()[header::SET_COOKIE]
            .to_str()
            .unwrap()
            .split(';')
            .next()
            .unwrap()
            .to_string()
    }

    const CABIN: &str = r#"{
        "title": "Cabin",
        "address": "1 Lake Rd",
        "addedPhotos": ["cabin.jpg"],
        "description": "Quiet",
        "perks": ["wifi"],
        "extraInfo": "",
        "checkIn": "14:00",
        "checkOut": "11:00",
        "maxGuests": 4,
        "price": 120
    }"#;

    #[tokio::test]
    async fn test_create_delete_ownership_over_http() {
        let app = app();
        let a = session_for(&app, "a@x.io").await;
        let b = session_for(&app, "b@x.io").await;

        let created = app
            .clone()
            .oneshot(request("POST", "/user-places", Some(&a), CABIN))
            .await
            .unwrap();
        assert_eq!(created.status(), StatusCode::OK);
        let place: PlaceResponse = body_json(created).await;
        assert_eq!(place.photos, vec!["cabin.jpg".to_string()]);

        let delete_body = format!(r#"{{"id":"{}"}}"#, place.id);

        let forbidden = app
            .clone()
            .oneshot(request("DELETE", "/user-places", Some(&b), &delete_body))
            .await
            .unwrap();
        assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);

        let still_there = app
            .clone()
            .oneshot(request("GET", &format!("/places/{}", place.id), None, ""))
            .await
            .unwrap();
        assert_eq!(still_there.status(), StatusCode::OK);

        let deleted = app
            .clone()
            .oneshot(request("DELETE", "/user-places", Some(&a), &delete_body))
            .await
            .unwrap();
        assert_eq!(deleted.status(), StatusCode::OK);

        let gone = app
            .oneshot(request("GET", &format!("/places/{}", place.id), None, ""))
            .await
            .unwrap();
        assert_eq!(gone.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_anonymous_writes_are_unauthorized() {
        let app = app();

        for (method, uri, body) in [
            ("GET", "/user-places", ""),
            ("POST", "/user-places", CABIN),
            ("DELETE", "/user-places", r#"{"id":"not-a-uuid"}"#),
            ("GET", "/bookings", ""),
            ("DELETE", "/bookings", r#"{"id":"not-a-uuid"}"#),
        ] {
            let response = app
                .clone()
                .oneshot(request(method, uri, None, body))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{method} {uri}");
        }
    }

    #[tokio::test]
    async fn test_anonymous_with_bad_body_is_unauthorized() {
        let app = app();

        for (method, uri) in [
            ("POST", "/user-places"),
            ("PUT", "/user-places"),
            ("DELETE", "/user-places"),
            ("POST", "/bookings"),
            ("DELETE", "/bookings"),
        ] {
            for body in ["{not json", r#"{"unexpected":true}"#] {
                let response = app
                    .clone()
                    .oneshot(request(method, uri, None, body))
                    .await
                    .unwrap();
                assert_eq!(
                    response.status(),
                    StatusCode::UNAUTHORIZED,
                    "{method} {uri} {body}"
                );
            }
        }
    }

    #[tokio::test]
    async fn test_signed_in_bad_body_is_rejected_after_session_check() {
        let app = app();
        let a = session_for(&app, "a@x.io").await;

        let response = app
            .oneshot(request("POST", "/user-places", Some(&a), "{not json"))
            .await
            .unwrap();
        assert!(response.status().is_client_error());
        assert_ne!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_public_browsing() {
        let app = app();
        let a = session_for(&app, "a@x.io").await;
        app.clone()
            .oneshot(request("POST", "/user-places", Some(&a), CABIN))
            .await
            .unwrap();

        let listed = app
            .clone()
            .oneshot(request("GET", "/places", None, ""))
            .await
            .unwrap();
        assert_eq!(listed.status(), StatusCode::OK);
        let places: Vec<PlaceResponse> = body_json(listed).await;
        assert_eq!(places.len(), 1);

        let bad_id = app
            .oneshot(request("GET", "/places/not-a-uuid", None, ""))
            .await
            .unwrap();
        assert_eq!(bad_id.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_booking_ignores_client_booker() {
        let app = app();
        let host = session_for(&app, "host@x.io").await;
        let guest = session_for(&app, "guest@x.io").await;

        let created = app
            .clone()
            .oneshot(request("POST", "/user-places", Some(&host), CABIN))
            .await
            .unwrap();
        let place: PlaceResponse = body_json(created).await;

        let body = format!(
            r#"{{"place":"{}","checkInDate":"2025-06-01","checkOutDate":"2025-06-03","guests":2,"total":240,"user":"{}"}}"#,
            place.id, place.owner
        );
        let booked = app
            .clone()
            .oneshot(request("POST", "/bookings", Some(&guest), &body))
            .await
            .unwrap();
        assert_eq!(booked.status(), StatusCode::OK);
        let booking: BookingResponse = body_json(booked).await;
        assert_ne!(booking.booker, place.owner);
        assert_eq!(booking.nights, 2);

        let listed = app
            .oneshot(request("GET", "/bookings", Some(&guest), ""))
            .await
            .unwrap();
        let bookings: Vec<BookingResponse> = body_json(listed).await;
        assert_eq!(bookings.len(), 1);
        assert_eq!(bookings[0].place_details.as_ref().unwrap().title, "Cabin");
    }

    #[tokio::test]
    async fn test_booking_with_reversed_dates() {
        let app = app();
        let host = session_for(&app, "host@x.io").await;
        let created = app
            .clone()
            .oneshot(request("POST", "/user-places", Some(&host), CABIN))
            .await
            .unwrap();
        let place: PlaceResponse = body_json(created).await;

        let body = format!(
            r#"{{"place":"{}","checkInDate":"2025-06-03","checkOutDate":"2025-06-01","guests":1,"total":0}}"#,
            place.id
        );
        let response = app
            .oneshot(request("POST", "/bookings", Some(&host), &body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
