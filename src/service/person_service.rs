use std::sync::Arc;

use crate::{
    consts::consts::PersonId,
    http::{
        client::HttpClient,
        error::ClientError,
        request::RequestOptions,
        transport::{ReqwestTransport, Transport},
    },
    model::person::{CreatePerson, Person, UpdatePerson},
    options::ClientOptions,
};

/// Typed CRUD API over the persons resource
///
/// Reads (`list`, `get`) go to the query API, writes (`create`, `update`, `remove`) go to the
/// command API. Whether both resolve to the same deployment is purely a matter of configuration.
///
/// Nothing is validated before sending: ids are placed in the path as given and bodies are sent
/// as is, the backend rejects bad input with an error status which surfaces as `ClientError::Api`.
///
/// Concurrent calls are independent, there is no ordering or conflict detection between them.
pub struct PersonService<T: Transport> {
    client: HttpClient<T>,
    command_resource: String,
    query_resource: String,
}

impl<T: Transport> Clone for PersonService<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            command_resource: self.command_resource.clone(),
            query_resource: self.query_resource.clone(),
        }
    }
}

impl PersonService<ReqwestTransport> {
    pub fn from_options(options: &ClientOptions) -> Result<Self, ClientError> {
        let transport = ReqwestTransport::new(options.timeout).map_err(ClientError::Build)?;

        Ok(Self::new(HttpClient::new(transport), options))
    }
}

impl<T: Transport> PersonService<T> {
    pub fn new(client: HttpClient<T>, options: &ClientOptions) -> Self {
        Self {
            client,
            command_resource: options.command_resource(),
            query_resource: options.query_resource(),
        }
    }

    pub fn with_transport(transport: Arc<T>, options: &ClientOptions) -> Self {
        Self::new(HttpClient::from_shared(transport), options)
    }

    pub fn client(&self) -> &HttpClient<T> {
        &self.client
    }

    /// `GET {query}/persons`
    pub async fn list(&self) -> Result<Vec<Person>, ClientError> {
        self.client
            .request(&self.query_resource, RequestOptions::get())
            .await
    }

    /// `GET {query}/persons/{id}`
    pub async fn get(&self, id: &PersonId) -> Result<Person, ClientError> {
        self.client
            .request(&self.query_item(id), RequestOptions::get())
            .await
    }

    /// `POST {command}/persons`
    pub async fn create(&self, data: &CreatePerson) -> Result<Person, ClientError> {
        let options = RequestOptions::post().set_json_body(data)?;

        let person: Person = self.client.request(&self.command_resource, options).await?;

        log::info!("Created person: {}", person.id);

        Ok(person)
    }

    /// `PATCH {command}/persons/{id}`
    pub async fn update(&self, id: &PersonId, data: &UpdatePerson) -> Result<Person, ClientError> {
        let options = RequestOptions::patch().set_json_body(data)?;

        let person: Person = self.client.request(&self.command_item(id), options).await?;

        log::info!("Updated person: {}", person.id);

        Ok(person)
    }

    /// `DELETE {command}/persons/{id}`, the API answers with the removed person
    pub async fn remove(&self, id: &PersonId) -> Result<Person, ClientError> {
        let person: Person = self
            .client
            .request(&self.command_item(id), RequestOptions::delete())
            .await?;

        log::info!("Removed person: {}", person.id);

        Ok(person)
    }

    fn query_item(&self, id: &PersonId) -> String {
        format!("{}/{}", self.query_resource, id)
    }

    fn command_item(&self, id: &PersonId) -> String {
        format!("{}/{}", self.command_resource, id)
    }
}
