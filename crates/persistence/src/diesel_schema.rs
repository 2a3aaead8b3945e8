// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

diesel::table! {
    ledger_documents (date) {
        date -> Text,
        document -> Text,
        updated_at -> Text,
    }
}
