//! The `Sec-Fetch-*` request metadata headers of
//! [Fetch Metadata](https://w3c.github.io/webappsec-fetch-metadata/).

token_enum_header! {
    /// `Sec-Fetch-Dest` header, the request's destination.
    ///
    /// # Example values
    /// * `document`
    /// * `image`
    pub enum SecFetchDest {
        /// `audio`
        Audio => "audio",
        /// `audioworklet`
        AudioWorklet => "audioworklet",
        /// `document`
        Document => "document",
        /// `embed`
        Embed => "embed",
        /// `empty`, used for `fetch()` and `XMLHttpRequest`.
        Empty => "empty",
        /// `fencedframe`
        FencedFrame => "fencedframe",
        /// `font`
        Font => "font",
        /// `frame`
        Frame => "frame",
        /// `iframe`
        Iframe => "iframe",
        /// `image`
        Image => "image",
        /// `json`
        Json => "json",
        /// `manifest`
        Manifest => "manifest",
        /// `object`
        Object => "object",
        /// `paintworklet`
        PaintWorklet => "paintworklet",
        /// `report`
        Report => "report",
        /// `script`
        Script => "script",
        /// `serviceworker`
        ServiceWorker => "serviceworker",
        /// `sharedworker`
        SharedWorker => "sharedworker",
        /// `style`
        Style => "style",
        /// `track`
        Track => "track",
        /// `video`
        Video => "video",
        /// `webidentity`
        WebIdentity => "webidentity",
        /// `worker`
        Worker => "worker",
        /// `xslt`
        Xslt => "xslt",
    }
}

token_enum_header! {
    /// `Sec-Fetch-Mode` header, the request's mode.
    ///
    /// # Example values
    /// * `navigate`
    /// * `cors`
    pub enum SecFetchMode {
        /// `cors`
        Cors => "cors",
        /// `navigate`
        Navigate => "navigate",
        /// `no-cors`
        NoCors => "no-cors",
        /// `same-origin`
        SameOrigin => "same-origin",
        /// `websocket`
        WebSocket => "websocket",
    }
}

token_enum_header! {
    /// `Sec-Fetch-Site` header, the relation between the request initiator
    /// and its target.
    ///
    /// # Example values
    /// * `same-origin`
    /// * `cross-site`
    pub enum SecFetchSite {
        /// `cross-site`
        CrossSite => "cross-site",
        /// `same-origin`
        SameOrigin => "same-origin",
        /// `same-site`
        SameSite => "same-site",
        /// `none`, a user-originated operation.
        None => "none",
    }
}
