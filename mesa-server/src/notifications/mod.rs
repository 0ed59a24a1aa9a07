//! Customer and restaurant email notifications.
//!
//! All sends are fire-and-forget: the booking flow never waits on the
//! mail provider and a delivery failure never fails the request. Failures
//! are logged and dropped.

pub mod resend;

use async_trait::async_trait;
use shared::models::{Reservation, Restaurant, User};
use std::sync::Arc;

/// Outbound mail seam. The production implementation is
/// [`resend::ResendMailer`]; tests record messages in memory.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> anyhow::Result<()>;
}

/// Mailer used when email delivery is disabled; logs instead of sending.
pub struct NoopMailer;

#[async_trait]
impl Mailer for NoopMailer {
    async fn send(&self, to: &str, subject: &str, _body: &str) -> anyhow::Result<()> {
        tracing::debug!(to = to, subject = subject, "Email delivery disabled, dropping message");
        Ok(())
    }
}

/// Dispatches notification emails on background tasks.
#[derive(Clone)]
pub struct Notifier {
    mailer: Arc<dyn Mailer>,
}

impl Notifier {
    pub fn new(mailer: Arc<dyn Mailer>) -> Self {
        Self { mailer }
    }

    fn dispatch(&self, to: String, subject: String, body: String) {
        let mailer = self.mailer.clone();
        tokio::spawn(async move {
            if let Err(e) = mailer.send(&to, &subject, &body).await {
                tracing::warn!(to = %to, error = %e, "Failed to send notification email");
            }
        });
    }

    /// Booking request stored as `PENDING`, restaurant will decide later.
    pub fn reservation_received(&self, reservation: &Reservation, restaurant: &Restaurant) {
        let subject = "Solicitud de reserva recibida / Reservation request received".to_string();
        let body = format!(
            "Hola {name},\n\
             Hemos recibido tu solicitud de reserva en {restaurant} para el {date} a las {time} \
             ({people} personas).\n\
             Te avisaremos cuando el restaurante la confirme.\n\
             Puedes cancelarla con este código: {token}\n\n\
             Hi {name},\n\
             We have received your reservation request at {restaurant} for {date} at {time} \
             ({people} people).\n\
             You will be notified once the restaurant confirms.\n\
             You can cancel it with this code: {token}",
            name = reservation.customer_name,
            restaurant = restaurant.name,
            date = reservation.date,
            time = reservation.time.format("%H:%M"),
            people = reservation.number_of_people,
            token = reservation.cancellation_token,
        );
        self.dispatch(reservation.customer_email.clone(), subject, body);
    }

    /// Reservation confirmed, either automatically or by the restaurant.
    pub fn reservation_confirmed(&self, reservation: &Reservation, restaurant: &Restaurant) {
        let subject = "Reserva confirmada / Reservation confirmed".to_string();
        let body = format!(
            "Hola {name},\n\
             Tu reserva en {restaurant} está confirmada: {date} a las {time} ({people} personas).\n\
             Si necesitas cancelarla, usa este código: {token}\n\n\
             Hi {name},\n\
             Your reservation at {restaurant} is confirmed: {date} at {time} ({people} people).\n\
             If you need to cancel, use this code: {token}",
            name = reservation.customer_name,
            restaurant = restaurant.name,
            date = reservation.date,
            time = reservation.time.format("%H:%M"),
            people = reservation.number_of_people,
            token = reservation.cancellation_token,
        );
        self.dispatch(reservation.customer_email.clone(), subject, body);
    }

    /// Reservation rejected by the restaurant, with an optional reason.
    pub fn reservation_rejected(&self, reservation: &Reservation, restaurant: &Restaurant) {
        let subject = "Reserva rechazada / Reservation declined".to_string();
        let reason_es = match &reservation.rejection_reason {
            Some(reason) => format!("Motivo: {reason}\n"),
            None => String::new(),
        };
        let reason_en = match &reservation.rejection_reason {
            Some(reason) => format!("Reason: {reason}\n"),
            None => String::new(),
        };
        let body = format!(
            "Hola {name},\n\
             Lamentamos informarte de que {restaurant} no ha podido aceptar tu reserva \
             del {date} a las {time}.\n\
             {reason_es}\n\
             Hi {name},\n\
             We are sorry to inform you that {restaurant} could not accept your reservation \
             for {date} at {time}.\n\
             {reason_en}",
            name = reservation.customer_name,
            restaurant = restaurant.name,
            date = reservation.date,
            time = reservation.time.format("%H:%M"),
        );
        self.dispatch(reservation.customer_email.clone(), subject, body);
    }

    /// Customer cancelled through the self-service link.
    pub fn reservation_cancelled(&self, reservation: &Reservation, restaurant: &Restaurant) {
        let subject = "Reserva cancelada / Reservation cancelled".to_string();
        let body = format!(
            "Hola {name},\n\
             Tu reserva en {restaurant} del {date} a las {time} ha sido cancelada.\n\n\
             Hi {name},\n\
             Your reservation at {restaurant} for {date} at {time} has been cancelled.",
            name = reservation.customer_name,
            restaurant = restaurant.name,
            date = reservation.date,
            time = reservation.time.format("%H:%M"),
        );
        self.dispatch(reservation.customer_email.clone(), subject, body);
    }

    /// Heads-up to the restaurant about a new booking, flagged with
    /// whether it was confirmed automatically or awaits their decision.
    pub fn new_reservation_alert(
        &self,
        reservation: &Reservation,
        restaurant: &Restaurant,
        auto_confirmed: bool,
    ) {
        let subject = "Nueva reserva / New reservation".to_string();
        let (state_es, state_en) = if auto_confirmed {
            ("Confirmada automáticamente", "Confirmed automatically")
        } else {
            ("Pendiente de confirmación", "Awaiting your confirmation")
        };
        let body = format!(
            "Nueva reserva ({state_es}):\n\
             {date} a las {time}, {people} personas, a nombre de {name} {last_name}.\n\
             Teléfono: {phone}\n\n\
             New reservation ({state_en}):\n\
             {date} at {time}, {people} people, under {name} {last_name}.\n\
             Phone: {phone}",
            date = reservation.date,
            time = reservation.time.format("%H:%M"),
            people = reservation.number_of_people,
            name = reservation.customer_name,
            last_name = reservation.customer_last_name,
            phone = reservation.customer_phone,
        );
        self.dispatch(restaurant.email.clone(), subject, body);
    }

    /// Welcome email for a freshly onboarded restaurant admin, carrying
    /// the temporary password they must change on first login.
    pub fn admin_welcome(&self, user: &User, restaurant_name: &str, temp_password: &str) {
        let subject = "Bienvenido a Mesa / Welcome to Mesa".to_string();
        let body = format!(
            "Hola {name},\n\
             Tu restaurante \"{restaurant}\" ya está dado de alta.\n\
             Tu contraseña temporal es: {password}\n\
             Deberás cambiarla al iniciar sesión por primera vez.\n\n\
             Hi {name},\n\
             Your restaurant \"{restaurant}\" has been registered.\n\
             Your temporary password is: {password}\n\
             You will be asked to change it on first login.",
            name = user.first_name,
            restaurant = restaurant_name,
            password = temp_password,
        );
        self.dispatch(user.email.clone(), subject, body);
    }
}
